//! `roadnet stats`: topology statistics without scoring.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use roadnet_core::{GraphStats, RoadGraph, RoadnetConfig, resolve_nodes};

use crate::input::read_layer;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `roadnet stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// GeoJSON file holding the road line layer.
    pub input: PathBuf,
}

/// Execute `roadnet stats`.
pub fn run_stats(args: &StatsArgs, config: &RoadnetConfig, output: OutputMode) -> anyhow::Result<()> {
    let layer = read_layer(&args.input)?;

    config.validate()?;
    let nodes = resolve_nodes(&layer.lines, &config.snap)?;
    let graph = RoadGraph::build(&layer.lines, nodes);
    let stats = GraphStats::from_graph(&graph);

    render_mode(output, &stats, render_stats_text, render_stats_pretty)
}

fn render_stats_text(stats: &GraphStats, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "nodes={} edges={} components={} isolated={} self_loops={} max_degree={} density={:.6} skipped_lines={} hash={}",
        stats.node_count,
        stats.edge_count,
        stats.component_count,
        stats.isolated_node_count,
        stats.self_loop_count,
        stats.max_degree,
        stats.density,
        stats.skipped_lines,
        stats.content_hash
    )
}

fn render_stats_pretty(stats: &GraphStats, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Road graph")?;
    pretty_kv(w, "Nodes", stats.node_count.to_string())?;
    pretty_kv(w, "Edges", stats.edge_count.to_string())?;
    pretty_kv(w, "Components", stats.component_count.to_string())?;
    pretty_kv(w, "Isolated nodes", stats.isolated_node_count.to_string())?;
    pretty_kv(w, "Self-loops", stats.self_loop_count.to_string())?;
    pretty_kv(w, "Max degree", stats.max_degree.to_string())?;
    pretty_kv(w, "Density", format!("{:.6}", stats.density))?;
    pretty_kv(w, "Skipped lines", stats.skipped_lines.to_string())?;
    pretty_kv(w, "Content hash", &stats.content_hash)
}
