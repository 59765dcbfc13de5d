use clap::{Parser, ValueEnum};
use itertools::Itertools;
use nagare::prelude::*;
use nagare::interaction::load_script;
use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// How the resulting graph is printed.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Replays an editing session against a flow document and reports the derived graph
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flow document JSON file
    flow_path: Option<String>,

    /// Path to a JSON array of editor events to replay
    #[arg(short, long)]
    events: Option<String>,

    /// Open the flow read-only (selection, pan and zoom only)
    #[arg(long)]
    read_only: bool,

    /// Write the final snapshot to this path
    #[arg(short, long)]
    output: Option<String>,

    /// How to print the resulting graph
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.human {
        run_interactive(cli.format);
    } else {
        run_non_interactive(cli);
    }
}

fn run_session(
    flow_path: String,
    events_path: Option<String>,
    read_only: bool,
    output_path: Option<String>,
    format: OutputFormat,
) {
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let load_start = Instant::now();
    let document = FlowDocument::from_file(&flow_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load flow: {}", e)));
    let events = match &events_path {
        Some(path) => load_script(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load event script: {}", e))),
        None => Vec::new(),
    };
    let load_duration = load_start.elapsed();

    let stored_edges = document.edges.len();

    // --- 2. Editor Setup ---
    let saves = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&saves);
    let mut editor = FlowEditor::from_document(document)
        .with_read_only(read_only)
        .with_observer(CoalescingObserver::new(move |_: &GraphSnapshot| {
            counter.set(counter.get() + 1)
        }))
        .build();

    let initial = editor.snapshot();
    if initial.edges.len() != stored_edges {
        println!(
            "Note: document stored {} edge(s), derived {} from node configuration.",
            stored_edges,
            initial.edges.len()
        );
    }

    // --- 3. Replay ---
    let replay_start = Instant::now();
    let mut graph_changes = 0usize;
    for event in events.iter().cloned() {
        if editor.handle(event).graph_changed {
            graph_changes += 1;
        }
    }
    if *editor.interaction_state() != InteractionState::Idle {
        // The script ended mid-gesture; release it so the last state is flushed.
        editor.handle(EditorEvent::PointerLeave);
    }
    let replay_duration = replay_start.elapsed();

    // --- 4. Results ---
    let snapshot = editor.snapshot();
    match format {
        OutputFormat::Text => print_graph(&snapshot, editor.selected()),
        OutputFormat::Json => {
            let json = FlowDocument::from(&snapshot)
                .to_json()
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize flow: {}", e)));
            println!("{}", json);
        }
    }

    if let Some(path) = &output_path {
        FlowDocument::from(&snapshot)
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save flow: {}", e)));
        println!("Saved flow to '{}'", path);
    }

    let total_duration = total_start.elapsed();
    println!("\n--- Session Summary ---");
    println!("Events Replayed:      {}", events.len());
    println!("Graph Changes:        {}", graph_changes);
    println!("Snapshots Saved:      {}", saves.get());
    println!(
        "Viewport:             pan ({:.1}, {:.1}) zoom {:.1}",
        editor.viewport().pan_x(),
        editor.viewport().pan_y(),
        editor.viewport().zoom()
    );

    println!("\n--- Performance Summary ---");
    println!("File Loading:         {:?}", load_duration);
    println!("Replay:               {:?}", replay_duration);
    println!("-----------------------------");
    println!("Total Execution:      {:?}", total_duration);
    println!();
}

fn print_graph(snapshot: &GraphSnapshot, selected: Option<&str>) {
    let by_type = snapshot
        .nodes
        .iter()
        .counts_by(|n| n.node_type)
        .into_iter()
        .sorted_by_key(|(t, _)| t.as_str())
        .map(|(t, count)| format!("{} x{}", t, count))
        .join(", ");
    println!("\nNodes ({}): {}", snapshot.nodes.len(), by_type);

    for node in &snapshot.nodes {
        let marker = if selected == Some(node.id.as_str()) { "*" } else { " " };
        let targets = snapshot.edges_from(&node.id).map(|e| e.target.as_str()).join(", ");
        println!(
            " {} {:<16} {:<10} {:<18} -> [{}]",
            marker, node.id, node.node_type, node.label, targets
        );
    }

    println!("\nEdges ({}):", snapshot.edges.len());
    for edge in &snapshot.edges {
        match &edge.label {
            Some(label) => println!("  {} -> {} ({})", edge.source, edge.target, label),
            None => println!("  {} -> {}", edge.source, edge.target),
        }
    }
}

/// Runs the CLI in non-interactive mode, taking all arguments from the command line.
fn run_non_interactive(cli: Cli) {
    let flow_path = cli.flow_path.unwrap_or_else(|| {
        exit_with_error("Flow path is required in non-interactive mode.");
    });

    run_session(flow_path, cli.events, cli.read_only, cli.output, cli.format);
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(format: OutputFormat) {
    println!("--- Nagare Interactive Mode ---");

    let flow_path = prompt_for_input("Enter flow document path", Some("data/flow.json"));
    let events_path = prompt_for_input("Enter event script path (optional)", None);
    let output_path = prompt_for_input("Enter output path (optional)", None);

    let read_only = loop {
        let choice = prompt_for_input("Open read-only? (y/n)", Some("n"));
        match choice.to_lowercase().as_str() {
            "y" | "yes" => break true,
            "n" | "no" => break false,
            _ => println!("Invalid choice. Please enter y or n."),
        }
    };

    run_session(
        flow_path,
        Some(events_path).filter(|p| !p.is_empty()),
        read_only,
        Some(output_path).filter(|p| !p.is_empty()),
        format,
    );
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to write prompt: {}", e));
    }
    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
