//! Construction of the drawable primitives for a bond.
//!
//! The renderer hands in the bond, its endpoint positions (already trimmed
//! to the atom label hulls with [`trim_axis`]) and an optional ring centroid;
//! it gets back a [`BondShape`] describing exactly which lines to stroke.
//! All distances derive from [`DrawingConfig`], so the output is scale-stable
//! regardless of how far apart the user actually drew the atoms.

use super::Segment;
use super::hull::trim_to_hull;
use crate::core::config::DrawingConfig;
use crate::core::models::bond::{Bond, BondOrder, BondPlacement, BondStereo};
use nalgebra::{Point2, Vector2};

/// Drawable geometry for one bond.
#[derive(Debug, Clone, PartialEq)]
pub enum BondShape {
    /// One line; dashed for partial bonds.
    Single { line: Segment, dashed: bool },
    /// Filled or hatched triangle, narrow end at the start atom.
    Wedge {
        outline: Vec<Point2<f64>>,
        hatched: bool,
    },
    /// Polyline for a bond of unknown configuration.
    Wavy { points: Vec<Point2<f64>> },
    /// Two parallel lines. For aromatic bonds the subsidiary is dashed.
    Double {
        main: Segment,
        subsidiary: Segment,
        subsidiary_dashed: bool,
    },
    /// Double bond of unknown cis/trans configuration.
    CrossedDouble { first: Segment, second: Segment },
    Triple { lines: [Segment; 3] },
}

/// Trims both endpoints of the bond axis to the given atom label hulls.
/// `None` means the atom draws no label and the line runs to its centre.
pub fn trim_axis(
    start: Point2<f64>,
    end: Point2<f64>,
    start_hull: Option<&[Point2<f64>]>,
    end_hull: Option<&[Point2<f64>]>,
) -> Segment {
    let trimmed_start = match start_hull {
        Some(hull) => trim_to_hull(start, end, hull),
        None => start,
    };
    let trimmed_end = match end_hull {
        Some(hull) => trim_to_hull(end, start, hull),
        None => end,
    };
    Segment::new(trimmed_start, trimmed_end)
}

/// Builds the drawable shape for `bond` along the (trimmed) axis
/// start→end.
///
/// `ring_centroid` is the centroid of the bond's placement ring, when the
/// bond is cyclic; the subsidiary line of a double bond goes on that side.
/// Acyclic double bonds fall back to the explicit placement hint, and
/// failing that are drawn symmetrically about the axis.
pub fn bond_geometry(
    bond: &Bond,
    start: Point2<f64>,
    end: Point2<f64>,
    ring_centroid: Option<Point2<f64>>,
    config: &DrawingConfig,
) -> BondShape {
    let axis = Segment::new(start, end);
    let length = axis.length();
    if length < f64::EPSILON {
        return BondShape::Single {
            line: axis,
            dashed: false,
        };
    }
    let dir = axis.vector() / length;
    // Perpendicular on the clockwise side of start→end (y grows downward
    // in sketch coordinates).
    let perp_cw = Vector2::new(dir.y, -dir.x);
    let offset = config.multiple_bond_offset_fraction * config.standard_bond_length;

    match (bond.stereo, bond.order) {
        (BondStereo::Wedge, _) | (BondStereo::Hatch, _) => {
            let half_width = config.wedge_width_fraction * config.standard_bond_length / 2.0;
            BondShape::Wedge {
                outline: vec![start, end + perp_cw * half_width, end - perp_cw * half_width],
                hatched: bond.stereo == BondStereo::Hatch,
            }
        }
        (BondStereo::Indeterminate, BondOrder::Single) => BondShape::Wavy {
            points: wavy_points(start, dir, perp_cw, length, config),
        },
        (_, BondOrder::Partial) => BondShape::Single {
            line: axis,
            dashed: true,
        },
        (_, BondOrder::Single) => BondShape::Single {
            line: axis,
            dashed: false,
        },
        (_, BondOrder::Aromatic) => {
            let side = side_vector(bond, axis, perp_cw, ring_centroid).unwrap_or(perp_cw);
            BondShape::Double {
                main: axis,
                subsidiary: offset_and_shortened(axis, dir, side * offset),
                subsidiary_dashed: true,
            }
        }
        (BondStereo::Indeterminate, BondOrder::Double) => BondShape::CrossedDouble {
            first: Segment::new(
                start + perp_cw * (offset / 2.0),
                end - perp_cw * (offset / 2.0),
            ),
            second: Segment::new(
                start - perp_cw * (offset / 2.0),
                end + perp_cw * (offset / 2.0),
            ),
        },
        (_, BondOrder::Double) => match side_vector(bond, axis, perp_cw, ring_centroid) {
            Some(side) => BondShape::Double {
                main: axis,
                subsidiary: offset_and_shortened(axis, dir, side * offset),
                subsidiary_dashed: false,
            },
            None => BondShape::Double {
                main: Segment::new(
                    start + perp_cw * (offset / 2.0),
                    end + perp_cw * (offset / 2.0),
                ),
                subsidiary: Segment::new(
                    start - perp_cw * (offset / 2.0),
                    end - perp_cw * (offset / 2.0),
                ),
                subsidiary_dashed: false,
            },
        },
        (_, BondOrder::Triple) => BondShape::Triple {
            lines: [
                axis,
                Segment::new(start + perp_cw * offset, end + perp_cw * offset),
                Segment::new(start - perp_cw * offset, end - perp_cw * offset),
            ],
        },
    }
}

/// Unit perpendicular pointing to the side the subsidiary line belongs on,
/// or `None` when neither ring geometry nor a placement hint decides it.
fn side_vector(
    bond: &Bond,
    axis: Segment,
    perp_cw: Vector2<f64>,
    ring_centroid: Option<Point2<f64>>,
) -> Option<Vector2<f64>> {
    if let Some(centroid) = ring_centroid {
        let toward = centroid - axis.midpoint();
        let dot = toward.dot(&perp_cw);
        if dot.abs() > f64::EPSILON {
            return Some(perp_cw * dot.signum());
        }
    }
    match bond.placement {
        Some(BondPlacement::Clockwise) => Some(perp_cw),
        Some(BondPlacement::Anticlockwise) => Some(-perp_cw),
        None => None,
    }
}

/// Parallel line displaced by `displacement` and pulled in by the same
/// amount at each end, so it sits inside the angle at both atoms.
fn offset_and_shortened(axis: Segment, dir: Vector2<f64>, displacement: Vector2<f64>) -> Segment {
    let inset = displacement.norm();
    Segment::new(
        axis.start + displacement + dir * inset,
        axis.end + displacement - dir * inset,
    )
}

fn wavy_points(
    start: Point2<f64>,
    dir: Vector2<f64>,
    perp_cw: Vector2<f64>,
    length: f64,
    config: &DrawingConfig,
) -> Vec<Point2<f64>> {
    let half_period = config.wavy_half_period_fraction * config.standard_bond_length;
    let steps = ((length / half_period).round() as usize).max(2);
    let amplitude = half_period / 2.0;
    (0..=steps)
        .map(|i| {
            let base = start + dir * (length * i as f64 / steps as f64);
            if i == 0 || i == steps {
                base
            } else if i % 2 == 1 {
                base + perp_cw * amplitude
            } else {
                base - perp_cw * amplitude
            }
        })
        .collect()
}
