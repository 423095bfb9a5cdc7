//! Geometry value types attached to cells.
//!
//! These are plain attribute bags: mutation goes through the model so prior
//! states can be captured for undo, and the model always replaces the whole
//! value rather than patching it in place.

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

/// Position, size and routing information for a cell.
///
/// For vertices `x`/`y`/`width`/`height` are the bounding box. For edges the
/// box is usually unused and `points` carries the routing waypoints;
/// `source_point`/`target_point` give fixed endpoints when a terminal is not
/// connected.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// When set, `x`/`y` are interpreted relative to the parent geometry.
    pub relative: bool,
    /// Absolute pixel offset applied after relative positioning.
    pub offset: Option<Point>,
    /// Edge routing waypoints, in order from source to target.
    pub points: Vec<Point>,
    /// Bounds used while the cell is collapsed (see [`Geometry::swap`]).
    pub alternate_bounds: Option<Box<Geometry>>,
    pub source_point: Option<Point>,
    pub target_point: Option<Point>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            relative: false,
            offset: None,
            points: Vec::new(),
            alternate_bounds: None,
            source_point: None,
            target_point: None,
        }
    }
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Default::default()
        }
    }

    /// Moves the box and the absolute terminal points by `(dx, dy)`.
    ///
    /// Relative geometries keep their coordinates (they move with the
    /// parent); waypoints and offsets are untouched either way.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if !self.relative {
            self.x += dx;
            self.y += dy;
        }
        if let Some(p) = &mut self.source_point {
            *p = point(p.x + dx, p.y + dy);
        }
        if let Some(p) = &mut self.target_point {
            *p = point(p.x + dx, p.y + dy);
        }
    }

    /// Exchanges the bounds with `alternate_bounds`, if present.
    ///
    /// Folding stores the expanded bounds here while a cell is collapsed, so
    /// collapsing twice restores the original box.
    pub fn swap(&mut self) {
        if let Some(alt) = self.alternate_bounds.take() {
            let old = Geometry::new(self.x, self.y, self.width, self.height);
            self.x = alt.x;
            self.y = alt.y;
            self.width = alt.width;
            self.height = alt.height;
            self.alternate_bounds = Some(Box::new(old));
        }
    }
}
