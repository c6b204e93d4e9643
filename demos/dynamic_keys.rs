use cipherflow::nodes::data::ConstantBytesNode;
use cipherflow::nodes::hash::sha2::Sha2Node;
use cipherflow::{GraphEngine, NodeData, NodeFactory, NodeGraph, NodeRegistry};
use egui::Pos2;

fn print_inputs(graph: &NodeGraph, node_id: usize) {
    let names: Vec<&str> = graph.nodes[&node_id]
        .inputs
        .iter()
        .map(|port| port.name.as_str())
        .collect();
    println!("  inputs: {:?}", names);
}

fn main() {
    env_logger::init();

    let registry = NodeRegistry::default();
    let mut engine = GraphEngine::from_registry(&registry);
    let mut graph = NodeGraph::new();

    let hash = Sha2Node::add_to_graph(&mut graph, Pos2::new(300.0, 100.0));
    println!("Created SHA2 node");
    print_inputs(&graph, hash);

    // Wire three keys in; every connection to the last key slot grows a new one
    let keys = ["alpha", "beta", "gamma"];
    for (i, value) in keys.iter().enumerate() {
        let mut constant = ConstantBytesNode::create(Pos2::new(100.0, 100.0 + i as f32 * 60.0));
        constant.set_parameter("value", NodeData::String(value.to_string()));
        let source = graph.add_node(constant);

        // key1 sits behind the algorithm widget at slot 0
        engine
            .connect_by_ids(&mut graph, source, 0, hash, i + 1)
            .expect("connect key");
        println!("Connected {:?} to key{}", value, i + 1);
        print_inputs(&graph, hash);
    }

    // Unwiring a middle key removes its slot and renumbers the rest
    engine.disconnect_input(&mut graph, hash, 2).expect("disconnect key2");
    println!("Disconnected key2");
    print_inputs(&graph, hash);

    let outputs = engine.evaluate(&graph, hash).expect("evaluate");
    if let NodeData::Bytes(digest) = &outputs[0] {
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        println!("SHA-256 over the remaining keys: {hex}");
    }
}
