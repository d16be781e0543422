//! `roadnet score`: connectivity per road node.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use roadnet_core::RoadnetConfig;
use roadnet_score::export::to_feature_collection;
use roadnet_score::{ConnectivityReport, compute_connectivity};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::input::{LineLayer, read_layer};
use crate::output::{OutputMode, fmt_opt, pretty_kv, pretty_section, render_mode};

/// Arguments for `roadnet score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// GeoJSON file holding the road line layer.
    pub input: PathBuf,

    /// Write the scored node FeatureCollection to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ScorePayload<'a> {
    summary: &'a roadnet_score::ConnectivitySummary,
    graph: &'a roadnet_core::GraphStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<Value>,
}

/// Execute `roadnet score`.
pub fn run_score(args: &ScoreArgs, config: &RoadnetConfig, output: OutputMode) -> anyhow::Result<()> {
    let layer = read_layer(&args.input)?;
    let report = compute_connectivity(&layer.lines, config)?;

    let collection = to_feature_collection(&report.records, layer.crs.as_deref());
    if let Some(path) = &args.output {
        write_collection(path, &collection)?;
        info!(path = %path.display(), nodes = report.records.len(), "wrote scored nodes");
    }

    let payload = ScorePayload {
        summary: &report.summary,
        graph: &report.graph,
        output: args.output.as_ref().map(|p| p.display().to_string()),
        nodes: args.output.is_none().then_some(collection),
    };

    render_mode(
        output,
        &payload,
        |_, w| render_score_text(&report, w),
        |p, w| render_score_pretty(&report, &layer, p.output.as_deref(), w),
    )
}

fn write_collection(path: &Path, collection: &Value) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = io::BufWriter::new(file);
    serde_json::to_writer(&mut writer, collection)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

fn render_score_text(report: &ConnectivityReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "node_id  x  y  normalized  connectivity")?;
    for r in &report.records {
        writeln!(
            w,
            "{}  {}  {}  {}  {}",
            r.node_id,
            r.geometry.x(),
            r.geometry.y(),
            r.normalized,
            r.connectivity
        )?;
    }
    Ok(())
}

fn render_score_pretty(
    report: &ConnectivityReport,
    layer: &LineLayer,
    written_to: Option<&str>,
    w: &mut dyn Write,
) -> io::Result<()> {
    pretty_section(w, "Road node connectivity")?;
    pretty_kv(w, "Lines", layer.lines.len().to_string())?;
    pretty_kv(w, "Nodes", report.summary.count.to_string())?;
    pretty_kv(w, "Edges", report.graph.edge_count.to_string())?;
    pretty_kv(w, "Components", report.graph.component_count.to_string())?;
    pretty_kv(w, "Min connectivity", fmt_opt(report.summary.min_connectivity))?;
    pretty_kv(w, "Max connectivity", fmt_opt(report.summary.max_connectivity))?;
    pretty_kv(w, "Mean connectivity", fmt_opt(report.summary.mean_connectivity))?;
    if let Some(crs) = &layer.crs {
        pretty_kv(w, "CRS", crs)?;
    }
    if let Some(path) = written_to {
        pretty_kv(w, "Written to", path)?;
    }
    Ok(())
}
