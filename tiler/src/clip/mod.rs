//! Clips geometries by axis parallel lines
//!
//! Each clipper walks the coordinate sequence once, classifying every edge
//! against the interval and inserting interpolated boundary crossings where
//! the edge leaves or enters it. Rings stay a single sequence and get
//! re-closed; open paths may split into several disjoint pieces.

use geo::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use itertools::Itertools;
use thiserror::Error;

use crate::bounds::BoundsCheck;
use crate::metrics::LogTimer;
use crate::planar::{Axis, AxisBounds};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipError {
    /// The clip window does not intersect the geometry. Expected and common;
    /// callers branch on it without inspecting any output shape.
    #[error("clip produced an empty geometry")]
    EmptyResult,
    /// The input is not a clippable shape. Surfaced immediately, never
    /// reported as empty.
    #[error("unsupported geometry type: {0}")]
    UnsupportedType(&'static str),
}

/// Clips a geometry to the rectangle [xmin, xmax] x [ymin, ymax] by running
/// an X axis clip and feeding its output into a Y axis clip. An empty X
/// result short-circuits the whole clip. Requires xmin <= xmax and
/// ymin <= ymax.
pub fn by_rectangle(
    g: &Geometry,
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
) -> Result<Geometry, ClipError> {
    let _timer = LogTimer::new("clip::by_rectangle");
    let clipped_x = by_axis(g, &AxisBounds::new(Axis::X, xmin, xmax))?;
    by_axis(&clipped_x, &AxisBounds::new(Axis::Y, ymin, ymax))
}

/// Clips a geometry against one axis interval, dispatching on its shape.
pub fn by_axis(g: &Geometry, bounds: &AxisBounds) -> Result<Geometry, ClipError> {
    match g {
        Geometry::MultiPolygon(mp) => multi_polygon(mp, bounds)
            .map(Geometry::MultiPolygon)
            .ok_or(ClipError::EmptyResult),
        Geometry::Polygon(p) => polygon(p, bounds)
            .map(Geometry::Polygon)
            .ok_or(ClipError::EmptyResult),
        Geometry::LineString(ls) => collect_pieces(line_string(ls, bounds)),
        Geometry::MultiLineString(mls) => collect_pieces(multi_line_string(mls, bounds)),
        Geometry::MultiPoint(mp) => multi_point(mp, bounds)
            .map(Geometry::MultiPoint)
            .ok_or(ClipError::EmptyResult),
        Geometry::Point(_) => Err(ClipError::UnsupportedType("Point")),
        Geometry::Line(_) => Err(ClipError::UnsupportedType("Line")),
        Geometry::Rect(_) => Err(ClipError::UnsupportedType("Rect")),
        Geometry::Triangle(_) => Err(ClipError::UnsupportedType("Triangle")),
        Geometry::GeometryCollection(_) => Err(ClipError::UnsupportedType("GeometryCollection")),
    }
}

// A single surviving piece narrows back to a plain line string.
fn collect_pieces(mut pieces: Vec<LineString>) -> Result<Geometry, ClipError> {
    match pieces.len() {
        0 => Err(ClipError::EmptyResult),
        1 => Ok(Geometry::LineString(pieces.remove(0))),
        _ => Ok(Geometry::MultiLineString(MultiLineString::new(pieces))),
    }
}

/// Clips every member polygon, dropping the ones that fall outside.
pub fn multi_polygon(mp: &MultiPolygon, bounds: &AxisBounds) -> Option<MultiPolygon> {
    let clipped: Vec<Polygon> = mp.iter().filter_map(|p| polygon(p, bounds)).collect();
    if clipped.is_empty() {
        None
    } else {
        Some(MultiPolygon::new(clipped))
    }
}

/// Clips a polygon. If the shell clips away the whole polygon is empty and
/// the holes are never visited.
pub fn polygon(p: &Polygon, bounds: &AxisBounds) -> Option<Polygon> {
    let shell = ring(p.exterior(), bounds)?;
    let holes = p
        .interiors()
        .iter()
        .filter_map(|hole| ring(hole, bounds))
        .collect();
    Some(Polygon::new(shell, holes))
}

/// Clips a closed ring in a single pass over its edges. The input follows
/// the stored-ring convention of an equal first and last coordinate, so the
/// pairwise walk covers the wraparound edge. Returns None when nothing of
/// the ring lies inside the bounds.
pub fn ring(r: &LineString, bounds: &AxisBounds) -> Option<LineString> {
    let coords = &r.0;
    let last_edge = coords.len().saturating_sub(2);
    let mut out: Vec<Coord> = Vec::with_capacity(coords.len());
    for (i, (&a, &b)) in coords.iter().tuple_windows().enumerate() {
        match bounds.compare(&a) {
            BoundsCheck::LessThan => match bounds.compare(&b) {
                // ---|-->  |
                BoundsCheck::Inside => {
                    out.push(bounds.intersect_min(&a, &b));
                    if i == last_edge {
                        // B is in bounds on the last edge; the wraparound
                        // that would have emitted it is already consumed.
                        out.push(b);
                    }
                }
                // ---|-----|-->
                BoundsCheck::GreaterThan => {
                    out.push(bounds.intersect_min(&a, &b));
                    out.push(bounds.intersect_max(&a, &b));
                }
                BoundsCheck::LessThan => {}
            },
            BoundsCheck::GreaterThan => match bounds.compare(&b) {
                // |  <--|---
                BoundsCheck::Inside => {
                    out.push(bounds.intersect_max(&a, &b));
                    if i == last_edge {
                        out.push(b);
                    }
                }
                // <--|----|---
                BoundsCheck::LessThan => {
                    out.push(bounds.intersect_max(&a, &b));
                    out.push(bounds.intersect_min(&a, &b));
                }
                BoundsCheck::GreaterThan => {}
            },
            BoundsCheck::Inside => {
                out.push(a);
                match bounds.compare(&b) {
                    // <--|---  |
                    BoundsCheck::LessThan => out.push(bounds.intersect_min(&a, &b)),
                    // |  ---|-->
                    BoundsCheck::GreaterThan => out.push(bounds.intersect_max(&a, &b)),
                    BoundsCheck::Inside => {}
                }
            }
        }
    }
    if out.is_empty() {
        return None;
    }
    // Restore closure; a skipped first edge rotates the start point.
    if out.first() != out.last() {
        out.push(out[0]);
    }
    Some(LineString::new(out))
}

/// Clips an open line string in a single pass. Unlike a ring, a path may
/// leave the window and come back, so the output is zero or more disjoint
/// pieces in traversal order.
pub fn line_string(ls: &LineString, bounds: &AxisBounds) -> Vec<LineString> {
    let coords = &ls.0;
    let last_edge = coords.len().saturating_sub(2);
    let mut pieces: Vec<LineString> = Vec::new();
    let mut part: Vec<Coord> = Vec::new();
    for (i, (&a, &b)) in coords.iter().tuple_windows().enumerate() {
        match bounds.compare(&a) {
            BoundsCheck::LessThan => match bounds.compare(&b) {
                BoundsCheck::Inside => {
                    part.push(bounds.intersect_min(&a, &b));
                    if i == last_edge {
                        part.push(b);
                    }
                }
                BoundsCheck::GreaterThan => {
                    // The edge traverses the whole window; its piece starts
                    // and ends on a boundary.
                    part.push(bounds.intersect_min(&a, &b));
                    part.push(bounds.intersect_max(&a, &b));
                    pieces.push(LineString::new(std::mem::take(&mut part)));
                }
                BoundsCheck::LessThan => {}
            },
            BoundsCheck::GreaterThan => match bounds.compare(&b) {
                BoundsCheck::Inside => {
                    part.push(bounds.intersect_max(&a, &b));
                    if i == last_edge {
                        part.push(b);
                    }
                }
                BoundsCheck::LessThan => {
                    part.push(bounds.intersect_max(&a, &b));
                    part.push(bounds.intersect_min(&a, &b));
                    pieces.push(LineString::new(std::mem::take(&mut part)));
                }
                BoundsCheck::GreaterThan => {}
            },
            BoundsCheck::Inside => {
                part.push(a);
                match bounds.compare(&b) {
                    BoundsCheck::LessThan => {
                        part.push(bounds.intersect_min(&a, &b));
                        pieces.push(LineString::new(std::mem::take(&mut part)));
                    }
                    BoundsCheck::GreaterThan => {
                        part.push(bounds.intersect_max(&a, &b));
                        pieces.push(LineString::new(std::mem::take(&mut part)));
                    }
                    BoundsCheck::Inside => {
                        if i == last_edge {
                            part.push(b);
                        }
                    }
                }
            }
        }
    }
    if !part.is_empty() {
        pieces.push(LineString::new(part));
    }
    pieces
}

/// Clips every member line string and flattens the resulting pieces,
/// preserving traversal order.
pub fn multi_line_string(mls: &MultiLineString, bounds: &AxisBounds) -> Vec<LineString> {
    mls.iter().flat_map(|ls| line_string(ls, bounds)).collect()
}

/// Keeps the points whose value on the bounds' axis falls inside the
/// interval. No interpolation; input order is preserved.
pub fn multi_point(mp: &MultiPoint, bounds: &AxisBounds) -> Option<MultiPoint> {
    let kept: Vec<Point> = mp
        .iter()
        .filter(|p| bounds.compare(&p.0) == BoundsCheck::Inside)
        .copied()
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(MultiPoint::new(kept))
    }
}
