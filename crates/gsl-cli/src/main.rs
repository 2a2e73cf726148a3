//! Graph language command-line tool.
//!
//! Provides the `gsl` binary for running the runtime's graph algorithms on a
//! graph given as a JSON snapshot or inline on the command line, e.g.
//!
//! ```text
//! gsl path --arc 'A->B' --arc 'B->C' --arc 'A->C' --from A --to C
//! ```
//!
//! Logging goes to stderr, filtered by `GSL_LOG` (or `RUST_LOG`).

mod error;
mod input;

use std::process;

use clap::{Parser, Subcommand};

use gsl_core::{GraphId, Heap};
use gsl_runtime::RuntimeConfig;

use crate::error::CliError;
use crate::input::GraphInput;

/// Graph language tools.
#[derive(Parser)]
#[command(name = "gsl", about = "Graph language tools")]
struct Cli {
    /// Print the result as a JSON graph snapshot.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the input graph.
    Show {
        #[command(flatten)]
        input: GraphInput,
    },

    /// Breadth-first reachability from a node.
    Bfs {
        #[command(flatten)]
        input: GraphInput,

        /// Label of the start node.
        #[arg(long)]
        from: String,
    },

    /// Depth-first reachability from a node.
    Dfs {
        #[command(flatten)]
        input: GraphInput,

        /// Label of the start node.
        #[arg(long)]
        from: String,
    },

    /// Shortest path between two nodes.
    Path {
        #[command(flatten)]
        input: GraphInput,

        /// Label of the start node.
        #[arg(long)]
        from: String,

        /// Label of the end node.
        #[arg(long)]
        to: String,
    },
}

fn main() {
    gsl_runtime::init_logging(&RuntimeConfig::from_env().log_filter);
    let cli = Cli::parse();

    match run(&cli) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

/// Executes the selected subcommand and renders its result graph.
fn run(cli: &Cli) -> Result<String, CliError> {
    let mut heap = Heap::new();
    let input = match &cli.command {
        Commands::Show { input }
        | Commands::Bfs { input, .. }
        | Commands::Dfs { input, .. }
        | Commands::Path { input, .. } => input,
    };
    let snap = input.load()?;
    let g = heap.load_snapshot(&snap)?;
    tracing::info!(nodes = snap.nodes.len(), arcs = snap.arcs.len(), "graph loaded");

    let result = match &cli.command {
        Commands::Show { .. } => g,
        Commands::Bfs { from, .. } => {
            let start = heap.make_node(from)?;
            heap.bfs(Some(g), Some(start))?
        }
        Commands::Dfs { from, .. } => {
            let start = heap.make_node(from)?;
            heap.dfs(Some(g), Some(start))?
        }
        Commands::Path { from, to, .. } => {
            let start = heap.make_node(from)?;
            let end = heap.make_node(to)?;
            heap.shortest_path(Some(g), Some(start), Some(end))?
        }
    };
    render(&heap, result, cli.json)
}

fn render(heap: &Heap, g: GraphId, json: bool) -> Result<String, CliError> {
    if json {
        Ok(heap.snapshot(g)?.to_json_pretty()?)
    } else {
        Ok(heap.display_graph(Some(g)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String, CliError> {
        let cli = Cli::try_parse_from(std::iter::once("gsl").chain(args.iter().copied()))
            .expect("arguments should parse");
        run(&cli)
    }

    const TRIANGLE: [&str; 6] = ["--arc", "A->B", "--arc", "B->C", "--arc", "A->C"];

    #[test]
    fn path_prefers_direct_arc() {
        let mut args = vec!["path"];
        args.extend(TRIANGLE);
        args.extend(["--from", "A", "--to", "C"]);
        assert_eq!(
            run_args(&args).unwrap(),
            "graph {\n  nodes: [\"A\", \"C\"]\n  arcs: [(A->C)]\n}"
        );
    }

    #[test]
    fn bfs_as_json() {
        let mut args = vec!["bfs", "--json", "--from", "B"];
        args.extend(TRIANGLE);
        let out = run_args(&args).unwrap();
        let snap = gsl_core::GraphSnapshot::from_json(&out).unwrap();
        assert_eq!(snap.nodes, ["B", "C"]);
        assert_eq!(snap.arcs, [("B".to_string(), "C".to_string())]);
    }

    #[test]
    fn unknown_start_gives_empty_graph() {
        let mut args = vec!["dfs", "--from", "Z"];
        args.extend(TRIANGLE);
        assert_eq!(
            run_args(&args).unwrap(),
            "graph {\n  nodes: []\n  arcs: []\n}"
        );
    }

    #[test]
    fn show_lists_nodes_in_order() {
        let out = run_args(&["show", "--node", "X", "--arc", "A->X"]).unwrap();
        assert_eq!(out, "graph {\n  nodes: [\"X\", \"A\"]\n  arcs: [(A->X)]\n}");
    }

    #[test]
    fn bad_arc_is_a_usage_error() {
        let err = run_args(&["show", "--arc", "AB"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
