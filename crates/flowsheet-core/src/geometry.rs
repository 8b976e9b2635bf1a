//! Geometric primitives for laying out process diagrams.
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned box anchored at its top-left corner
//!
//! # Coordinate System
//!
//! Coordinates follow the BPMN diagram-interchange convention, which is the
//! same as SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Negative coordinates are legal. Column layout centers each column on
//! `y = 0` before applying the configured offset, so shapes in tall columns
//! can end up above the origin.

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use flowsheet_core::geometry::Point;
/// let source = Point::new(136.0, 43.0);
/// let target = Point::new(350.0, 65.0);
///
/// let delta = target.sub_point(source);
/// assert_eq!(delta.x(), 214.0);
/// assert_eq!(delta.y(), 22.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Returns a point with the absolute value of each coordinate
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }
}

/// Width and height of a shape.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned rectangle described by its top-left corner and size.
///
/// This is exactly the shape of a `dc:Bounds` record, which is why the
/// top-left corner is stored instead of min/max coordinates.
///
/// # Examples
///
/// ```
/// # use flowsheet_core::geometry::{Bounds, Point, Size};
/// let bounds = Bounds::new_from_top_left(Point::new(100.0, 25.0), Size::new(36.0, 36.0));
///
/// assert_eq!(bounds.max_x(), 136.0);
/// assert_eq!(bounds.center(), Point::new(118.0, 43.0));
/// assert_eq!(bounds.right_center(), Point::new(136.0, 43.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    top_left: Point,
    size: Size,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self { top_left, size }
    }

    /// Returns the same size moved so its top-left corner sits at `top_left`
    pub fn with_top_left(mut self, top_left: Point) -> Self {
        self.top_left = top_left;
        self
    }

    pub fn min_x(self) -> f32 {
        self.top_left.x
    }

    pub fn min_y(self) -> f32 {
        self.top_left.y
    }

    pub fn max_x(self) -> f32 {
        self.top_left.x + self.size.width
    }

    pub fn max_y(self) -> f32 {
        self.top_left.y + self.size.height
    }

    pub fn width(self) -> f32 {
        self.size.width
    }

    pub fn height(self) -> f32 {
        self.size.height
    }

    /// Returns the top-left corner
    pub fn min_point(self) -> Point {
        self.top_left
    }

    pub fn to_size(self) -> Size {
        self.size
    }

    /// Returns the center point of the rectangle
    pub fn center(self) -> Point {
        Point::new(
            self.top_left.x + self.size.width / 2.0,
            self.top_left.y + self.size.height / 2.0,
        )
    }

    /// Midpoint of the right edge
    pub fn right_center(self) -> Point {
        Point::new(self.max_x(), self.center().y())
    }

    /// Midpoint of the left edge
    pub fn left_center(self) -> Point {
        Point::new(self.min_x(), self.center().y())
    }

    /// Midpoint of the top edge
    pub fn top_center(self) -> Point {
        Point::new(self.center().x(), self.min_y())
    }

    /// Midpoint of the bottom edge
    pub fn bottom_center(self) -> Point {
        Point::new(self.center().x(), self.max_y())
    }
}
