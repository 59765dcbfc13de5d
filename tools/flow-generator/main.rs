use clap::Parser;
use nagare::model::{BranchExpression, CONDITION_SUB_TYPE, FlowDocument, Node, NodeType};
use nagare::toolbox::{self, ToolboxEntry};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value, json};

/// A CLI tool to generate random flow documents for the Nagare editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// Number of nodes to generate besides the start node
    #[arg(short, long, default_value_t = 12)]
    nodes: usize,

    /// Probability that a reference points at a node that does not exist
    #[arg(long, default_value_t = 0.05)]
    dangling: f64,

    /// Maximum number of branches per condition node
    #[arg(long, default_value_t = 3)]
    max_branches: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if !(0.0..=1.0).contains(&cli.dangling) {
        eprintln!("Error: --dangling ({}) must be between 0 and 1", cli.dangling);
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    println!(
        "Generating a flow with {} node(s) (dangling reference rate {:.0}%)...",
        cli.nodes,
        cli.dangling * 100.0
    );

    let mut generator = FlowGenerator::new(&mut rng, cli.dangling, cli.max_branches);
    let nodes = generator.generate(cli.nodes);

    // Edges are derived on load; the generator only stores the node collection.
    let document = FlowDocument {
        nodes,
        edges: Vec::new(),
    };
    document.save(&cli.output)?;

    println!(
        "Successfully generated and saved flow to '{}'",
        cli.output
    );

    Ok(())
}

struct FlowGenerator<'a, R: Rng> {
    rng: &'a mut R,
    dangling: f64,
    max_branches: usize,
    palette: Vec<&'static ToolboxEntry>,
}

impl<'a, R: Rng> FlowGenerator<'a, R> {
    fn new(rng: &'a mut R, dangling: f64, max_branches: usize) -> Self {
        let palette = toolbox::entries()
            .iter()
            .filter(|e| e.node_type != NodeType::Start)
            .collect();
        Self {
            rng,
            dangling,
            max_branches,
            palette,
        }
    }

    /// Lays the nodes out as a loose top-to-bottom chain, then wires them with forward references.
    fn generate(&mut self, count: usize) -> Vec<Node> {
        let ids: Vec<String> = (1..=count).map(|i| format!("node_{}", i)).collect();

        let mut nodes = vec![Node::start().with_config(self.linear_config(ids.first()))];
        for (index, id) in ids.iter().enumerate() {
            let Some(entry) = self.palette.choose(&mut *self.rng).copied() else {
                break;
            };
            let x = self.rng.random_range(0.0..800.0f64).round();
            let y = 100.0 + 140.0 * (index + 1) as f64;
            let later = &ids[index + 1..];

            let node = Node::new(id.clone(), entry.node_type, entry.sub_type, entry.label, x, y);
            let config = if entry.sub_type == CONDITION_SUB_TYPE {
                self.condition_config(later)
            } else {
                let next = later.choose(&mut *self.rng);
                self.linear_config(next)
            };
            nodes.push(node.with_config(config));
        }

        let branches: usize = nodes.iter().map(|n| n.config.expressions().len()).sum();
        println!("-> Generated {} node(s) with {} branch(es).", nodes.len(), branches);
        nodes
    }

    fn reference(&mut self, target: Option<&String>) -> Option<String> {
        if self.rng.random_bool(self.dangling) {
            return Some(format!("missing_{}", self.rng.random_range(100..1000)));
        }
        target.cloned()
    }

    fn linear_config(&mut self, target: Option<&String>) -> Map<String, Value> {
        let mut config = Map::new();
        if let Some(next) = self.reference(target) {
            config.insert("nextNodeId".to_string(), json!(next));
        }
        if self.rng.random_bool(0.3) {
            config.insert("timeoutSeconds".to_string(), json!(self.rng.random_range(3..30)));
        }
        config
    }

    fn condition_config(&mut self, later: &[String]) -> Map<String, Value> {
        let count = self.rng.random_range(1..=self.max_branches.max(1));
        let expressions: Vec<Value> = (0..count)
            .map(|i| {
                let name = if self.rng.random_bool(0.5) {
                    format!("Route {}", i + 1)
                } else {
                    String::new()
                };
                let target = later.choose(&mut *self.rng);
                let id = format!("expr_{}", i);
                let mut expression = BranchExpression::new(id, name, "caller.tier == 'vip'");
                expression.target_node_id = self.reference(target);
                serde_json::to_value(expression).unwrap_or(Value::Null)
            })
            .collect();

        let mut config = Map::new();
        config.insert("expressions".to_string(), Value::Array(expressions));
        config
    }
}
