use geo::Coord;

use super::Axis;

/// A straight segment between two coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    start: Coord,
    end: Coord,
}

impl Line {
    pub fn new(start: Coord, end: Coord) -> Self {
        Line { start, end }
    }

    /// Returns the point where this segment crosses the infinite line at
    /// `position` on `axis`, by linear interpolation. The segment must
    /// actually span `position` on that axis; a segment parallel to the cut
    /// line has no defined intersection.
    pub fn intersect_with_axis(&self, axis: Axis, position: f64) -> Coord {
        let opposite = axis.invert();
        let axis_distance = position - axis.value(&self.start);
        let rise_over_run = (opposite.value(&self.end) - opposite.value(&self.start))
            / (axis.value(&self.end) - axis.value(&self.start));
        axis.coord(
            position,
            axis_distance * rise_over_run + opposite.value(&self.start),
        )
    }
}
