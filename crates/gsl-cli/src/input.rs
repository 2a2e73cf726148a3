//! Building the input graph from a snapshot file and inline flags.

use std::path::{Path, PathBuf};

use clap::Args;

use gsl_core::GraphSnapshot;

use crate::error::CliError;

/// Where the input graph comes from. File entries come first, then inline
/// ones.
#[derive(Debug, Default, Args)]
pub struct GraphInput {
    /// JSON graph snapshot: {"nodes": [...], "arcs": [["A", "B"], ...]}.
    #[arg(short, long)]
    pub graph: Option<PathBuf>,

    /// Node label to append (repeatable).
    #[arg(short, long = "node")]
    pub nodes: Vec<String>,

    /// Arc to append, written FROM->TO (repeatable).
    #[arg(short, long = "arc")]
    pub arcs: Vec<String>,
}

impl GraphInput {
    pub fn load(&self) -> Result<GraphSnapshot, CliError> {
        let mut snap = match &self.graph {
            Some(path) => read_snapshot(path)?,
            None => GraphSnapshot::default(),
        };
        snap.nodes.extend(self.nodes.iter().cloned());
        for raw in &self.arcs {
            let (from, to) = parse_arc(raw)?;
            for end in [&from, &to] {
                if !snap.nodes.contains(end) {
                    snap.nodes.push(end.clone());
                }
            }
            snap.arcs.push((from, to));
        }
        Ok(snap)
    }
}

fn read_snapshot(path: &Path) -> Result<GraphSnapshot, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(GraphSnapshot::from_json(&text)?)
}

/// Splits `FROM->TO` on the first arrow.
pub fn parse_arc(raw: &str) -> Result<(String, String), CliError> {
    let invalid = || CliError::InvalidArc(raw.to_string());
    let (from, to) = raw.split_once("->").ok_or_else(invalid)?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(invalid());
    }
    Ok((from.to_string(), to.to_string()))
}
