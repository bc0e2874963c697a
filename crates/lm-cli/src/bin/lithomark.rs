use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use lithomark::pipeline::{LogoConfig, RunSummary, run};
use lithomark::{ExportUnits, Margins};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lithomark")]
#[command(about = "Translate a raster logo into masked conductor-layer geometry")]
struct Cli {
    /// Margins in pixel-pitch units: bottom,left,top,right
    #[arg(short, long, required = true)]
    margins: String,

    /// The logo image to place
    #[arg(short, long, required = true)]
    image: PathBuf,

    /// Contrast bias in [0, 1]
    #[arg(short, long, default_value_t = 0.5)]
    contrast: f64,

    /// Conductor layout pre-filtered to the target layer
    #[arg(short = 'g', long, required = true)]
    conductor_gds: PathBuf,

    /// Output layer id
    #[arg(short, long, required = true)]
    layer: i16,

    /// Output datatype id
    #[arg(short, long, default_value_t = 0)]
    datatype: i16,

    /// Name of the logo cell
    #[arg(short, long, default_value = "logo")]
    name: String,

    /// If present, also write an SVG preview here
    #[arg(short, long)]
    svg: Option<PathBuf>,

    /// Output layout file
    #[arg(short, long, required = true)]
    out: PathBuf,

    /// If present, write a JSON run report here
    #[arg(short, long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct ReportDto {
    canvas_px: [usize; 2],
    cells: usize,
    placed: usize,
    kept: usize,
    rejected: usize,
    density_percent: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let margins = parse_margins(&cli.margins)?;

    let cfg = LogoConfig {
        margins,
        image: cli.image,
        contrast: cli.contrast,
        conductor_gds: cli.conductor_gds,
        layer: cli.layer,
        datatype: cli.datatype,
        cell_name: cli.name,
        out_gds: cli.out,
        out_svg: cli.svg,
        units: ExportUnits::default(),
        min_extent_dbu: None,
    };

    let summary = run(&cfg)?;
    println!("logo density: {:.4} %", summary.density_percent);

    if let Some(report_path) = &cli.report {
        write_report(report_path, &summary)?;
    }
    Ok(())
}

fn parse_margins(raw: &str) -> Result<Margins> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid margin value '{s}'"))
        })
        .collect::<Result<_>>()?;

    if parts.len() != 4 {
        bail!(
            "margins must be four comma-separated values (bottom,left,top,right), got {}",
            parts.len()
        );
    }

    Ok(Margins {
        bottom: parts[0],
        left: parts[1],
        top: parts[2],
        right: parts[3],
    })
}

fn write_report(path: &PathBuf, summary: &RunSummary) -> Result<()> {
    let dto = ReportDto {
        canvas_px: [summary.canvas_px.0, summary.canvas_px.1],
        cells: summary.cells,
        placed: summary.placed,
        kept: summary.kept,
        rejected: summary.rejected,
        density_percent: summary.density_percent,
    };
    let bytes = serde_json::to_vec_pretty(&dto).context("serializing run report")?;
    fs::write(path, bytes).with_context(|| format!("writing report {}", path.display()))
}
