use std::collections::{HashMap, HashSet};
use std::path::Path;

use lm_core::{DbPoint, Poly};
use tracing::warn;

use crate::Error;
use crate::record::{RecordReader, rtype};

/// Boundary element with its layer/datatype tag.
#[derive(Debug, Clone, PartialEq)]
pub struct GdsPoly {
    pub layer: i16,
    pub datatype: i16,
    pub poly: Poly,
}

/// Placed structure reference.
#[derive(Debug, Clone, PartialEq)]
pub struct StructRef {
    pub target: String,
    pub origin: DbPoint,
    pub angle_deg: f64,
    pub mag: f64,
    pub mirrored: bool,
}

impl StructRef {
    /// Identity placement: no rotation, no mirroring, unit magnification.
    pub fn is_identity_oriented(&self) -> bool {
        !self.mirrored && self.angle_deg == 0.0 && (self.mag - 1.0).abs() < 1e-9
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Structure {
    pub name: String,
    pub polys: Vec<GdsPoly>,
    pub refs: Vec<StructRef>,
}

/// Parsed stream library. Coordinates stay in the file's database units
/// until [`Library::flatten_to_dbu`] rescales them.
#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    pub name: String,
    /// Meters per database unit, from the UNITS record.
    pub dbu_meters: f64,
    pub structures: Vec<Structure>,
}

enum Element {
    None,
    Boundary {
        layer: i16,
        datatype: i16,
        points: Vec<DbPoint>,
    },
    Reference(StructRef),
    /// Recognized but unsupported element; consumed until ENDEL.
    Skipped,
}

impl Library {
    pub fn read(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        let mut reader = RecordReader::new(data);

        let mut name = String::new();
        let mut dbu_meters = None;
        let mut structures = Vec::new();
        let mut current: Option<Structure> = None;
        let mut element = Element::None;

        while let Some(rec) = reader.next_record()? {
            match rec.rectype {
                rtype::HEADER | rtype::BGNLIB | rtype::BGNSTR => {}
                rtype::LIBNAME => name = rec.ascii(),
                rtype::UNITS => {
                    let reals = rec.real8s()?;
                    if reals.len() != 2 {
                        return Err(Error::Malformed {
                            offset: rec.offset,
                            what: "UNITS must hold two reals",
                        });
                    }
                    dbu_meters = Some(reals[1]);
                }
                rtype::STRNAME => {
                    current = Some(Structure {
                        name: rec.ascii(),
                        ..Structure::default()
                    });
                }
                rtype::ENDSTR => {
                    let s = current.take().ok_or(Error::Malformed {
                        offset: rec.offset,
                        what: "ENDSTR outside a structure",
                    })?;
                    structures.push(s);
                }
                rtype::BOUNDARY => {
                    element = Element::Boundary {
                        layer: 0,
                        datatype: 0,
                        points: Vec::new(),
                    };
                }
                rtype::SREF => {
                    element = Element::Reference(StructRef {
                        target: String::new(),
                        origin: DbPoint::default(),
                        angle_deg: 0.0,
                        mag: 1.0,
                        mirrored: false,
                    });
                }
                rtype::AREF => {
                    warn!("array references are not supported; skipping element");
                    element = Element::Skipped;
                }
                rtype::LAYER => {
                    if let Element::Boundary { layer, .. } = &mut element {
                        *layer = first_i16(&rec.i16s()?);
                    }
                }
                rtype::DATATYPE => {
                    if let Element::Boundary { datatype, .. } = &mut element {
                        *datatype = first_i16(&rec.i16s()?);
                    }
                }
                rtype::SNAME => {
                    if let Element::Reference(r) = &mut element {
                        r.target = rec.ascii();
                    }
                }
                rtype::STRANS => {
                    if let Element::Reference(r) = &mut element {
                        let flags = first_i16(&rec.i16s()?) as u16;
                        r.mirrored = flags & 0x8000 != 0;
                    }
                }
                rtype::MAG => {
                    if let Element::Reference(r) = &mut element {
                        r.mag = first_real(&rec.real8s()?, 1.0);
                    }
                }
                rtype::ANGLE => {
                    if let Element::Reference(r) = &mut element {
                        r.angle_deg = first_real(&rec.real8s()?, 0.0);
                    }
                }
                rtype::XY => {
                    let coords = rec.i32s()?;
                    match &mut element {
                        Element::Boundary { points, .. } => {
                            points.extend(coords.chunks_exact(2).map(|c| DbPoint {
                                x: f64::from(c[0]),
                                y: f64::from(c[1]),
                            }));
                        }
                        Element::Reference(r) => {
                            if coords.len() >= 2 {
                                r.origin = DbPoint {
                                    x: f64::from(coords[0]),
                                    y: f64::from(coords[1]),
                                };
                            }
                        }
                        Element::None | Element::Skipped => {}
                    }
                }
                rtype::ENDEL => {
                    match std::mem::replace(&mut element, Element::None) {
                        Element::Boundary {
                            layer,
                            datatype,
                            points,
                        } => {
                            if let Some(s) = current.as_mut() {
                                if let Some(poly) = close_ring(points) {
                                    s.polys.push(GdsPoly {
                                        layer,
                                        datatype,
                                        poly,
                                    });
                                } else {
                                    warn!("skipping degenerate boundary with fewer than 3 points");
                                }
                            }
                        }
                        Element::Reference(r) => {
                            if let Some(s) = current.as_mut() {
                                s.refs.push(r);
                            }
                        }
                        Element::None | Element::Skipped => {}
                    }
                }
                rtype::ENDLIB => break,
                // Anything else (paths, texts, properties) is skipped by
                // record length.
                _ => {}
            }
        }

        Ok(Self {
            name,
            dbu_meters: dbu_meters.ok_or(Error::MissingUnits)?,
            structures,
        })
    }

    /// Structures never referenced by another structure.
    pub fn top_structures(&self) -> Vec<&Structure> {
        let referenced: HashSet<&str> = self
            .structures
            .iter()
            .flat_map(|s| s.refs.iter().map(|r| r.target.as_str()))
            .collect();
        self.structures
            .iter()
            .filter(|s| !referenced.contains(s.name.as_str()))
            .collect()
    }

    /// Flattens all top structures into bare polygons on the target
    /// database grid (`target_dbu_meters` per unit).
    ///
    /// Only identity-oriented references are resolved; a rotated,
    /// mirrored or magnified placement logs a diagnostic and contributes
    /// nothing, so the flattened footprint may be under-represented.
    pub fn flatten_to_dbu(&self, target_dbu_meters: f64) -> Vec<Poly> {
        let scale = self.dbu_meters / target_dbu_meters;
        let index: HashMap<&str, &Structure> = self
            .structures
            .iter()
            .map(|s| (s.name.as_str(), s))
            .collect();

        let mut out = Vec::new();
        for top in self.top_structures() {
            flatten_into(top, 0.0, 0.0, 0, scale, &index, &mut out);
        }
        out
    }
}

fn flatten_into(
    structure: &Structure,
    ox: f64,
    oy: f64,
    depth: usize,
    scale: f64,
    index: &HashMap<&str, &Structure>,
    out: &mut Vec<Poly>,
) {
    if depth > 32 {
        warn!(
            structure = %structure.name,
            "reference nesting deeper than 32 levels; stopping"
        );
        return;
    }

    for gp in &structure.polys {
        out.push(Poly {
            points: gp
                .poly
                .points
                .iter()
                .map(|p| DbPoint {
                    x: (p.x + ox) * scale,
                    y: (p.y + oy) * scale,
                })
                .collect(),
        });
    }

    for r in &structure.refs {
        if !r.is_identity_oriented() {
            warn!(
                target = %r.target,
                angle = r.angle_deg,
                mag = r.mag,
                mirrored = r.mirrored,
                "orientation not supported; skipping reference"
            );
            continue;
        }
        match index.get(r.target.as_str()) {
            Some(child) => flatten_into(
                child,
                ox + r.origin.x,
                oy + r.origin.y,
                depth + 1,
                scale,
                index,
                out,
            ),
            None => warn!(target = %r.target, "reference to unknown structure; skipping"),
        }
    }
}

fn first_i16(values: &[i16]) -> i16 {
    values.first().copied().unwrap_or(0)
}

fn first_real(values: &[f64], default: f64) -> f64 {
    values.first().copied().unwrap_or(default)
}

/// Drops the duplicated closing point of a boundary ring.
fn close_ring(mut points: Vec<DbPoint>) -> Option<Poly> {
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return None;
    }
    Some(Poly { points })
}
