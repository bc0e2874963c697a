//! Runs the full pipeline on a synthetic conductor footprint and a
//! generated checkerboard logo, then prints the run summary.

use anyhow::Result;
use lithomark::pipeline::{LogoConfig, run};
use lithomark::{DbRect, ExportUnits, GdsPoly, Margins, Poly, Structure, write_library};

fn main() -> Result<()> {
    let dir = tempfile::tempdir()?;

    // Two corner pads spanning a 30x30-pixel bounding box.
    let metal_path = dir.path().join("metal.gds");
    let metal = Structure {
        name: "metal".to_owned(),
        polys: vec![
            GdsPoly {
                layer: 134,
                datatype: 0,
                poly: Poly::from_rect(&DbRect::new(0.0, 0.0, 4000.0, 4000.0)),
            },
            GdsPoly {
                layer: 134,
                datatype: 0,
                poly: Poly::from_rect(&DbRect::new(56000.0, 56000.0, 60000.0, 60000.0)),
            },
        ],
        refs: Vec::new(),
    };
    write_library(&metal_path, "chip", &[metal], ExportUnits::default())?;

    // Checkerboard of 3x3-pixel tiles.
    let image_path = dir.path().join("checker.png");
    let mut img = image::GrayImage::new(30, 30);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let dark = (x / 3 + y / 3) % 2 == 0;
        *px = image::Luma([if dark { 0 } else { 255 }]);
    }
    img.save(&image_path)?;

    let summary = run(&LogoConfig {
        margins: Margins::default(),
        image: image_path,
        contrast: 0.5,
        conductor_gds: metal_path,
        layer: 134,
        datatype: 0,
        cell_name: "checker".to_owned(),
        out_gds: dir.path().join("checker.gds"),
        out_svg: Some(dir.path().join("checker.svg")),
        units: ExportUnits::default(),
        min_extent_dbu: None,
    })?;

    println!(
        "canvas: {}x{} px, {} cells, {} primitives placed",
        summary.canvas_px.0, summary.canvas_px.1, summary.cells, summary.placed
    );
    println!(
        "kept {} polygons ({} rejected), density {:.2} %",
        summary.kept, summary.rejected, summary.density_percent
    );
    Ok(())
}
