use clap::{Parser, Subcommand};
use itertools::Itertools;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use warmeleads::flow;
use warmeleads::prelude::*;
use warmeleads::visualizer::visualize_graph;

/// Scripted sales chat engine CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to an engine configuration TOML file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Use a JSON script instead of the built-in chat
    #[arg(short, long, global = true)]
    script: Option<String>,

    /// Use a compiled script artifact instead of the built-in chat
    #[arg(short, long, global = true, conflicts_with = "script")]
    artifact: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chat with the bot in the terminal
    Chat {
        /// Do not wait for the per-message delay
        #[arg(long)]
        no_delay: bool,
    },
    /// Check every transition and report dead ends and unreachable nodes
    Validate,
    /// Print the graph as a readable listing
    Show,
    /// Print the price block for an industry and lead type
    Summary {
        #[arg(short, long)]
        industry: String,
        #[arg(short, long, default_value = "")]
        lead_type: String,
    },
    /// Compile a JSON script into a bincode artifact
    Compile { script_path: String, output_path: String },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Chat { no_delay } => {
            let graph = load_graph(&cli.script, &cli.artifact, &config);
            run_chat(DialogueEngine::with_config(graph, &config), no_delay);
        }
        Command::Validate => run_validate(&cli.script, &cli.artifact, &config),
        Command::Show => {
            let graph = load_graph(&cli.script, &cli.artifact, &config);
            let name = cli.script.as_deref().or(cli.artifact.as_deref()).unwrap_or("warmeleads");
            print!("{}", visualize_graph(&graph, name));
        }
        Command::Summary {
            industry,
            lead_type,
        } => println!("{}", config.pricing_table().order_summary(&industry, &lead_type)),
        Command::Compile {
            script_path,
            output_path,
        } => run_compile(&script_path, &output_path),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_script(script: &Option<String>, artifact: &Option<String>) -> Option<ScriptDefinition> {
    if let Some(path) = script {
        let json = std::fs::read_to_string(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to read script '{}': {}", path, e)));
        return Some(
            ScriptDefinition::from_json(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse script: {}", e))),
        );
    }
    artifact.as_ref().map(|path| {
        ScriptDefinition::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load artifact: {}", e)))
    })
}

fn load_graph(
    script: &Option<String>,
    artifact: &Option<String>,
    config: &EngineConfig,
) -> DialogueGraph {
    match load_script(script, artifact) {
        Some(script) => script
            .compile()
            .unwrap_or_else(|e| exit_with_error(&format!("Script compilation failed: {}", e))),
        None => flow::from_config(config)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to build chat: {}", e))),
    }
}

/// Reports all issues instead of stopping at the first failed build.
fn run_validate(script: &Option<String>, artifact: &Option<String>, config: &EngineConfig) {
    let graph = match load_script(script, artifact) {
        Some(script) => match script.compile() {
            Ok(graph) => graph,
            Err(ScriptError::Graph(GraphError::Invalid(issues))) => {
                report_issues(&issues);
                std::process::exit(1);
            }
            Err(e) => exit_with_error(&format!("Script compilation failed: {}", e)),
        },
        None => flow::builder(Arc::new(config.pricing_table()))
            .start(config.start_node.clone())
            .build_unchecked(),
    };

    let issues = graph.validate();
    let unreachable = graph.unreachable_nodes();
    println!("Nodes: {}", graph.len());
    println!("Edges: {}", graph.edges().len());
    if !unreachable.is_empty() {
        println!("Unreachable: {}", unreachable.iter().join(", "));
    }
    if issues.is_empty() {
        println!("OK: every transition resolves to a node or '{}'", TERMINAL);
    } else {
        report_issues(&issues);
        std::process::exit(1);
    }
}

fn report_issues(issues: &[GraphIssue]) {
    println!("{} issue(s) found:", issues.len());
    for issue in issues {
        println!("  - {}", issue);
    }
}

fn run_compile(script_path: &str, output_path: &str) {
    let json = std::fs::read_to_string(script_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read script '{}': {}", script_path, e))
    });
    let script = ScriptDefinition::from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse script: {}", e)));
    let graph = script
        .compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Script compilation failed: {}", e)));
    script
        .save(output_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write artifact: {}", e)));
    println!(
        "Compiled {} nodes from '{}' into '{}'",
        graph.len(),
        script_path,
        output_path
    );
}

fn run_chat(engine: DialogueEngine, no_delay: bool) {
    println!("--- WarmeLeads chat (type 'quit' to stop) ---\n");
    let mut chat = Conversation::new(&engine);
    let mut next = chat.start();

    while let Some(message) = next {
        if !no_delay {
            thread::sleep(Duration::from_millis(message.delay.min(3000)));
        }
        println!("Lisa: {}", message.message.replace('\n', "\n      "));
        for (i, label) in message.labels().iter().enumerate() {
            println!("  {}) {}", i + 1, label);
        }

        let Some(input) = prompt_for_input("Jij") else {
            break;
        };
        if input.eq_ignore_ascii_case("quit") {
            break;
        }
        // A number picks the matching button.
        let reply = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| message.options.get(i))
            .map_or(input.clone(), |choice| choice.label.clone());
        next = chat.reply(&reply);
    }

    println!("\n--- Conversation finished ---");
    let profile = chat.profile();
    match serde_json::to_string_pretty(profile) {
        Ok(json) => println!("Profile:\n{}", json),
        Err(e) => eprintln!("Could not serialize profile: {}", e),
    }
    match CheckoutRequest::from_profile(profile) {
        Ok(request) => println!(
            "Ready for checkout: {} x {} ({})",
            request.quantity, request.lead_type, request.industry
        ),
        Err(e) => println!("Not ready for checkout: {}", e),
    }
}

/// Prompts on stdout and reads one line; `None` once stdin is closed.
fn prompt_for_input(prompt_text: &str) -> Option<String> {
    print!("> {}: ", prompt_text);
    io::stdout().flush().ok();
    read_reply(&mut io::stdin().lock())
}

fn read_reply(input: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
