use std::path::Path;

use crate::Error;
use crate::read::Structure;
use crate::record::{put_ascii, put_empty, put_i16s, put_i32s, put_real8s, rtype};

/// Library scaling written to the UNITS record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportUnits {
    /// Meters per user unit.
    pub unit_meters: f64,
    /// Meters per database unit.
    pub precision_meters: f64,
}

impl Default for ExportUnits {
    fn default() -> Self {
        Self {
            unit_meters: 1e-9,
            precision_meters: 1e-9,
        }
    }
}

/// Serializes a library of boundary-only structures.
///
/// Coordinates are rounded to the integer database grid. Reference
/// elements are not written; timestamps are zeroed so output is
/// byte-for-byte deterministic.
pub fn library_bytes(name: &str, structures: &[Structure], units: ExportUnits) -> Vec<u8> {
    let mut out = Vec::new();
    put_i16s(&mut out, rtype::HEADER, &[600]);
    put_i16s(&mut out, rtype::BGNLIB, &[0; 12]);
    put_ascii(&mut out, rtype::LIBNAME, name);
    put_real8s(
        &mut out,
        rtype::UNITS,
        &[
            units.precision_meters / units.unit_meters,
            units.precision_meters,
        ],
    );

    for structure in structures {
        put_i16s(&mut out, rtype::BGNSTR, &[0; 12]);
        put_ascii(&mut out, rtype::STRNAME, &structure.name);

        for gp in &structure.polys {
            put_empty(&mut out, rtype::BOUNDARY);
            put_i16s(&mut out, rtype::LAYER, &[gp.layer]);
            put_i16s(&mut out, rtype::DATATYPE, &[gp.datatype]);

            let mut xy = Vec::with_capacity((gp.poly.points.len() + 1) * 2);
            for p in &gp.poly.points {
                xy.push(p.x.round() as i32);
                xy.push(p.y.round() as i32);
            }
            if let Some(first) = gp.poly.points.first() {
                xy.push(first.x.round() as i32);
                xy.push(first.y.round() as i32);
            }
            put_i32s(&mut out, rtype::XY, &xy);
            put_empty(&mut out, rtype::ENDEL);
        }

        put_empty(&mut out, rtype::ENDSTR);
    }

    put_empty(&mut out, rtype::ENDLIB);
    out
}

pub fn write_library(
    path: &Path,
    name: &str,
    structures: &[Structure],
    units: ExportUnits,
) -> Result<(), Error> {
    std::fs::write(path, library_bytes(name, structures, units))?;
    Ok(())
}
