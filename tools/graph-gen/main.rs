use clap::Parser;
use infragraph::diagram::{
    ComponentKind, ComponentNode, Connection, Diagram, Position, PropertyInput, PropertyValue,
    export_json,
};
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use std::fs;

/// A CLI tool to generate random InfraGraph diagrams for demos and manual testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated diagram to
    #[arg(short, long, default_value = "generated_diagram.json")]
    output: String,

    /// The minimum number of components
    #[arg(long, default_value_t = 3)]
    min: usize,

    /// The maximum number of components
    #[arg(long, default_value_t = 12)]
    max: usize,

    /// Chance (0.0 - 1.0) that a component is connected to the one placed before it
    #[arg(long, default_value_t = 0.6)]
    link_chance: f64,

    /// Include a few components of a type outside the catalog
    #[arg(long)]
    with_unknown: bool,
}

const NAMES: [&str; 12] = [
    "Web", "API", "Worker", "Orders", "Users", "Assets", "Edge", "Auth", "Billing", "Search",
    "Reports", "Queue",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    env_logger::init();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.link_chance) {
        eprintln!("Error: --link-chance must be between 0.0 and 1.0");
        std::process::exit(1);
    }

    let count = rng.random_range(cli.min..=cli.max);
    println!("Generating a diagram with {} components...", count);

    let nodes: Vec<ComponentNode> = (0..count)
        .map(|index| generate_node(&mut rng, index, cli.with_unknown))
        .collect();
    let edges = generate_edges(&mut rng, &nodes, cli.link_chance);
    println!("-> Generated {} connection(s).", edges.len());

    let diagram = Diagram::new(nodes, edges);
    fs::write(&cli.output, export_json(&diagram)?)?;

    println!("Successfully saved the diagram to '{}'", cli.output);
    Ok(())
}

fn generate_node(rng: &mut ThreadRng, index: usize, with_unknown: bool) -> ComponentNode {
    let kind = if with_unknown && rng.random_bool(0.1) {
        ComponentKind::Other("message-queue".to_string())
    } else {
        ComponentKind::KNOWN
            .choose(rng)
            .cloned()
            .unwrap_or(ComponentKind::Server)
    };

    let base = NAMES.choose(rng).copied().unwrap_or("Node");
    let name = format!("{} {}", base, kind.label());
    let position = Position::new(
        (index % 4) as f64 * 220.0 + rng.random_range(0.0..40.0),
        (index / 4) as f64 * 160.0 + rng.random_range(0.0..40.0),
    );
    let label = kind.label().to_string();

    let mut node = ComponentNode::new(format!("node-{}", index + 1), kind, name)
        .with_label(label)
        .at(position);

    for spec in node.kind.property_schema() {
        let value = match spec.input {
            PropertyInput::Select(options) => options
                .choose(rng)
                .map(|option| PropertyValue::text(*option))
                .unwrap_or_else(|| spec.default_value()),
            PropertyInput::Number => PropertyValue::from(rng.random_range(1u64..=16) * 64),
            PropertyInput::Boolean => PropertyValue::Bool(rng.random_bool(0.5)),
            PropertyInput::Text => spec.default_value(),
        };
        node.properties.insert(spec.key.to_string(), value);
    }

    node
}

fn generate_edges(rng: &mut ThreadRng, nodes: &[ComponentNode], link_chance: f64) -> Vec<Connection> {
    nodes
        .windows(2)
        .filter(|_| rng.random_bool(link_chance))
        .map(|pair| Connection::new(pair[0].id.clone(), pair[1].id.clone()))
        .collect()
}
