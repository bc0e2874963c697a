//! Sequential one-shot logo pipeline.
//!
//! Stage order is fixed: footprint load, canvas sizing, quantization,
//! dither encoding, mask replication, composition, cleanup, export. A
//! canvas mismatch aborts before any geometry is produced; all file
//! writes happen in the terminal stage.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use lm_compose::{
    CLEARANCE_GROWTH_DBU, CanvasSpec, CleanConfig, Margins, clean, compose, density_percent,
    replicate_mask,
};
use lm_core::{PIXEL_PITCH_DBU, bounding_box, quantize_luma};
use lm_dither::{encode, placed_rects};
use lm_gds::{ExportUnits, GdsPoly, Library, Structure, write_library};
use tracing::info;

use crate::svg::render_preview;

#[derive(Debug, Clone)]
pub struct LogoConfig {
    /// Margin quadruple in pixel-pitch units.
    pub margins: Margins,
    pub image: PathBuf,
    /// Contrast bias in `[0, 1]`.
    pub contrast: f64,
    /// Conductor layout pre-filtered to a single layer/datatype.
    pub conductor_gds: PathBuf,
    pub layer: i16,
    pub datatype: i16,
    pub cell_name: String,
    pub out_gds: PathBuf,
    pub out_svg: Option<PathBuf>,
    pub units: ExportUnits,
    /// Cleaner threshold override; defaults to one pixel pitch.
    pub min_extent_dbu: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub canvas_px: (usize, usize),
    pub cells: usize,
    pub placed: usize,
    pub kept: usize,
    pub rejected: usize,
    pub density_percent: f64,
}

pub fn run(cfg: &LogoConfig) -> Result<RunSummary> {
    let library = Library::read(&cfg.conductor_gds)
        .with_context(|| format!("reading conductor layout {}", cfg.conductor_gds.display()))?;
    let footprint = library.flatten_to_dbu(cfg.units.precision_meters);
    let bbox = bounding_box(&footprint).context("conductor layout holds no geometry")?;

    let canvas = CanvasSpec::from_bbox(bbox, cfg.margins, PIXEL_PITCH_DBU);

    let raster = image::open(&cfg.image)
        .with_context(|| format!("opening logo image {}", cfg.image.display()))?
        .to_luma8();
    let (img_w, img_h) = raster.dimensions();
    let (img_w, img_h) = (img_w as usize, img_h as usize);

    canvas.fit(img_w, img_h)?;

    let grid = quantize_luma(img_w, img_h, raster.as_raw(), cfg.contrast)
        .context("quantizing logo image")?;

    let cells = encode(&grid);
    let rects = placed_rects(&cells, PIXEL_PITCH_DBU);

    let mask = replicate_mask(&footprint, PIXEL_PITCH_DBU);

    let shift = (
        cfg.margins.left * PIXEL_PITCH_DBU,
        cfg.margins.bottom * PIXEL_PITCH_DBU + img_h as f64 * PIXEL_PITCH_DBU,
    );
    let composed = compose(&rects, shift, CLEARANCE_GROWTH_DBU, &mask);

    let clean_cfg = CleanConfig {
        min_extent_dbu: cfg.min_extent_dbu.unwrap_or(PIXEL_PITCH_DBU),
    };
    let cleaned = clean(&composed, &clean_cfg);

    let density = density_percent(&cleaned, canvas.area());
    info!(density_percent = density, "logo density");

    let cell = Structure {
        name: format!("{}_logo", cfg.cell_name),
        polys: cleaned
            .iter()
            .map(|poly| GdsPoly {
                layer: cfg.layer,
                datatype: cfg.datatype,
                poly: poly.clone(),
            })
            .collect(),
        refs: Vec::new(),
    };
    write_library(&cfg.out_gds, &cfg.cell_name, &[cell], cfg.units)
        .with_context(|| format!("writing logo layout {}", cfg.out_gds.display()))?;

    if let Some(svg_path) = &cfg.out_svg {
        let preview = render_preview(&composed, 1.0 / PIXEL_PITCH_DBU);
        fs::write(svg_path, preview)
            .with_context(|| format!("writing preview {}", svg_path.display()))?;
    }

    Ok(RunSummary {
        canvas_px: (canvas.width_px, canvas.height_px),
        cells: cells.len(),
        placed: rects.len(),
        kept: cleaned.len(),
        rejected: composed.len() - cleaned.len(),
        density_percent: density,
    })
}
