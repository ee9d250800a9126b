//! `amrg` — command-line interface for amrgraph.
//!
//! Provides subcommands for working with semantic graphs on the command line:
//!
//! - **`render`** — print the header block and canonical expression.
//! - **`triples`** — print the graph as tab-separated triples.
//! - **`labels`** — print node labels breadth-first from the root.
//! - **`validate`** — check graphs for dangling references and bad roles.
//! - **`compare`** — annotate two parallel files node by node.
//! - **`compare-gold`** — annotate two system files against a gold file.
//!
//! All subcommands read JSON (one graph or an array) from a file path or
//! from stdin (`-`). Logs go to stderr; set `RUST_LOG` to adjust them.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use amrgraph::render::render_annotated;
use amrgraph::{load_graphs, validate_graph, ComparisonContext, DanglingPolicy, Graph, Side};
use clap::{Args, Parser, Subcommand};

/// amrg — semantic graph CLI
///
/// Render, inspect, validate, and compare rooted semantic graphs.
#[derive(Parser)]
#[command(name = "amrg", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Input {
    /// Path to a JSON file, or `-` for stdin.
    file: PathBuf,

    /// Reject graphs whose root or edges name missing nodes instead of
    /// rendering them with placeholders.
    #[arg(long, env = "AMRG_STRICT")]
    strict: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print each graph as its header block and canonical expression.
    Render {
        #[command(flatten)]
        input: Input,
    },

    /// Print each graph as tab-separated `source role target` triples.
    ///
    /// Graphs are separated by a blank line.
    Triples {
        #[command(flatten)]
        input: Input,

        /// Rewrite `:role-of` edges as `:role` edges in the other direction.
        #[arg(long, env = "AMRG_NORMALIZE_INVERSE")]
        normalize_inverse: bool,
    },

    /// Print each graph's node labels, breadth-first from the root.
    Labels {
        #[command(flatten)]
        input: Input,
    },

    /// Validate graphs. Exits 0 if all graphs are valid, 1 otherwise.
    Validate {
        /// Path to a JSON file, or `-` for stdin.
        file: PathBuf,
    },

    /// Compare two files of graphs for the same sentences.
    ///
    /// Graphs are paired by position. Nodes and edges present in both are
    /// marked `+`, the rest `-`.
    Compare {
        first: PathBuf,
        second: PathBuf,
    },

    /// Compare two system files against a gold file.
    ///
    /// A node or edge is marked `+` when only that system matches gold, and
    /// `-` when only that system produced something gold does not have.
    CompareGold {
        first: PathBuf,
        second: PathBuf,
        gold: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amrgraph=warn,amrg=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render { input } => {
            for graph in input.load() {
                print!("{}", graph.amr_string());
            }
        }

        Command::Triples {
            input,
            normalize_inverse,
        } => {
            let graphs = input.load();
            for (i, graph) in graphs.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                for triple in graph.triples(normalize_inverse) {
                    println!("{triple}");
                }
            }
        }

        Command::Labels { input } => {
            for graph in input.load() {
                println!("{}", graph.ordered_node_labels().join(" "));
            }
        }

        Command::Validate { file } => {
            let graphs = read_graphs(&file, DanglingPolicy::Tolerate);
            let mut all_valid = true;
            for (i, graph) in graphs.iter().enumerate() {
                if let Err(e) = validate_graph(graph) {
                    if graphs.len() == 1 {
                        eprintln!("error: {}", e);
                    } else {
                        eprintln!("error in graph {} ({}): {}", i, graph.id, e);
                    }
                    all_valid = false;
                }
            }
            if all_valid {
                if graphs.len() == 1 {
                    println!("valid");
                } else {
                    println!("all {} graphs valid", graphs.len());
                }
            } else {
                process::exit(1);
            }
        }

        Command::Compare { first, second } => {
            let ctx = ComparisonContext::pairs(
                read_graphs(&first, DanglingPolicy::Tolerate),
                read_graphs(&second, DanglingPolicy::Tolerate),
            );
            tracing::info!("comparing {} graph pairs", ctx.len());
            let sides = [(Side::First, "1:".to_string()), (Side::Second, "2:".to_string())];
            print_comparison(&ctx, &sides);
        }

        Command::CompareGold {
            first,
            second,
            gold,
        } => {
            let ctx = ComparisonContext::with_gold(
                read_graphs(&first, DanglingPolicy::Tolerate),
                read_graphs(&second, DanglingPolicy::Tolerate),
                read_graphs(&gold, DanglingPolicy::Tolerate),
            );
            tracing::info!("comparing {} graphs against gold", ctx.len());
            let sides = [
                (Side::First, format!("1 {}:", first.display())),
                (Side::Second, format!("2 {}:", second.display())),
                (Side::Gold, "gold:".to_string()),
            ];
            print_comparison(&ctx, &sides);
        }
    }
}

impl Input {
    fn load(&self) -> Vec<Graph> {
        let policy = if self.strict {
            DanglingPolicy::Reject
        } else {
            DanglingPolicy::Tolerate
        };
        read_graphs(&self.file, policy)
    }
}

/// Print the annotated listing of every compared graph, one block per side.
fn print_comparison(ctx: &ComparisonContext, sides: &[(Side, String)]) {
    for id in ctx.ids() {
        for (side, heading) in sides {
            if let Some(graph) = ctx.graph(id, *side) {
                println!("{heading}");
                print!("{}", render_annotated(graph, &ctx.annotator(*side)));
            }
        }
        println!();
    }
}

/// Read and parse graphs from a file, or stdin when the path is `"-"`.
fn read_graphs(path: &Path, policy: DanglingPolicy) -> Vec<Graph> {
    let json = read_input(path);
    match load_graphs(&json, policy) {
        Ok(graphs) if graphs.is_empty() => {
            fatal("input contains an empty array — nothing to process")
        }
        Ok(graphs) => {
            tracing::debug!("loaded {} graphs from {}", graphs.len(), path.display());
            graphs
        }
        Err(e) => fatal(&format!("{}: {}", path.display(), e)),
    }
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &Path) -> String {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            fatal(&format!("failed to read {}: {}", path.display(), e))
        })
    }
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("amrg: {}", msg);
    process::exit(2);
}
