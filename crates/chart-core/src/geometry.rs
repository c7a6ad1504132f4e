// File: crates/chart-core/src/geometry.rs
// Summary: Integer pixel geometry: axis-aligned boxes, rotated corner quads and the helpers between them.

use std::fmt;

/// An integer point in canvas pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P({},{})", self.x, self.y)
    }
}

/// Axis-aligned box with integer edges.
///
/// An all-zero box doubles as "unset"; a real box anchored at the origin with zero size
/// cannot be told apart from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RectI32 {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { top, left, right, bottom }
    }
    pub const fn from_ltwh(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { top, left, right: left + width, bottom: top + height }
    }
    pub const fn is_zero(&self) -> bool {
        self.top == 0 && self.left == 0 && self.right == 0 && self.bottom == 0
    }
    pub const fn width(&self) -> i32 { (self.right - self.left).abs() }
    pub const fn height(&self) -> i32 { (self.bottom - self.top).abs() }

    /// Center point, rounded towards the top-left.
    pub const fn center(&self) -> Point {
        Point::new(self.left + (self.width() >> 1), self.top + (self.height() >> 1))
    }

    /// Width over height; zero-height boxes report an infinite aspect.
    pub fn aspect(&self) -> f64 {
        f64::from(self.width()) / f64::from(self.height())
    }

    pub fn equals(&self, other: RectI32) -> bool {
        *self == other
    }

    /// True if any edge of `self` lies outside `other`.
    pub const fn is_bigger_than(&self, other: RectI32) -> bool {
        self.top < other.top || self.bottom > other.bottom || self.left < other.left || self.right > other.right
    }

    /// True if every edge of `self` lies strictly inside `other`.
    pub const fn is_smaller_than(&self, other: RectI32) -> bool {
        self.top > other.top && self.bottom < other.bottom && self.left > other.left && self.right < other.right
    }

    /// True if `other` lies entirely within `self` (edges may touch).
    pub const fn contains(&self, other: RectI32) -> bool {
        other.top >= self.top && other.left >= self.left && other.right <= self.right && other.bottom <= self.bottom
    }

    /// Smallest box containing both `self` and `other`.
    pub fn grow(&self, other: RectI32) -> Self {
        Self {
            top: self.top.min(other.top),
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    pub const fn shift(&self, x: i32, y: i32) -> Self {
        Self { top: self.top + y, left: self.left + x, right: self.right + x, bottom: self.bottom + y }
    }

    /// Inscribes a box with `other`'s aspect ratio inside `self`, centered.
    pub fn fit(&self, other: RectI32) -> Self {
        let ba = self.aspect();
        let oa = other.aspect();
        if oa == ba || !oa.is_finite() || oa <= 0.0 {
            return *self;
        }
        let bw = f64::from(self.width());
        let bh = f64::from(self.height());
        if oa > ba {
            // full width, trimmed height
            let half = ((bw / oa) as i32) >> 1;
            let mid = self.top + (self.height() >> 1);
            return Self { top: mid - half, left: self.left, right: self.right, bottom: mid + half };
        }
        let half = ((bh * oa) as i32) >> 1;
        let mid = self.left + (self.width() >> 1);
        Self { top: self.top, left: mid - half, right: mid + half, bottom: self.bottom }
    }

    /// Clips `self` to its intersection with `other`.
    pub fn constrain(&self, other: RectI32) -> Self {
        Self {
            top: self.top.max(other.top),
            left: self.left.max(other.left),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    /// Shrinks `self` so that content measured as `measured` would stay inside `bounds`.
    ///
    /// Overflow past an edge of `bounds` moves the same edge of `self` inward by the
    /// overflow amount; edges without overflow are left alone.
    pub fn outer_constrain(&self, bounds: RectI32, measured: RectI32) -> Self {
        let mut out = *self;
        if measured.top < bounds.top {
            out.top = self.top + (bounds.top - measured.top);
        }
        if measured.left < bounds.left {
            out.left = self.left + (bounds.left - measured.left);
        }
        if measured.right > bounds.right {
            out.right = self.right - (measured.right - bounds.right);
        }
        if measured.bottom > bounds.bottom {
            out.bottom = self.bottom - (measured.bottom - bounds.bottom);
        }
        out
    }

    pub const fn corners(&self) -> BoxCorners {
        BoxCorners {
            top_left: Point::new(self.left, self.top),
            top_right: Point::new(self.right, self.top),
            bottom_right: Point::new(self.right, self.bottom),
            bottom_left: Point::new(self.left, self.bottom),
        }
    }
}

impl fmt::Display for RectI32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "box({},{},{},{})", self.top, self.left, self.right, self.bottom)
    }
}

/// A box whose four corners move independently (e.g. after rotation).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoxCorners {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl BoxCorners {
    /// Axis-aligned bounds of the quad.
    pub fn bounds(&self) -> RectI32 {
        RectI32 {
            top: self.top_left.y.min(self.top_right.y),
            left: self.top_left.x.min(self.bottom_left.x),
            right: self.top_right.x.max(self.bottom_right.x),
            bottom: self.bottom_left.y.max(self.bottom_right.y),
        }
    }

    pub fn width(&self) -> i32 {
        let left = self.top_left.x.min(self.bottom_left.x);
        let right = self.top_right.x.max(self.bottom_right.x);
        right - left
    }

    pub fn height(&self) -> i32 {
        let top = self.top_left.y.min(self.top_right.y);
        let bottom = self.bottom_left.y.max(self.bottom_right.y);
        bottom - top
    }

    pub fn center(&self) -> Point {
        let left = mean(self.top_left.x, self.bottom_left.x);
        let right = mean(self.top_right.x, self.bottom_right.x);
        let top = mean(self.top_left.y, self.top_right.y);
        let bottom = mean(self.bottom_left.y, self.bottom_right.y);
        Point::new(((right - left) >> 1) + left, ((bottom - top) >> 1) + top)
    }

    /// Rotates every corner about the centroid of the quad.
    ///
    /// The pivot is the exact mean of the corners rather than [`BoxCorners::center`], so
    /// rotating by `θ` and then `-θ` lands within a pixel of where it started.
    pub fn rotate(&self, theta_degrees: f64) -> Self {
        let corners = [self.top_left, self.top_right, self.bottom_right, self.bottom_left];
        let cx = corners.iter().map(|p| f64::from(p.x)).sum::<f64>() / 4.0;
        let cy = corners.iter().map(|p| f64::from(p.y)).sum::<f64>() / 4.0;
        let theta = degrees_to_radians(theta_degrees);
        let [top_left, top_right, bottom_right, bottom_left] = corners.map(|p| rotate_about(cx, cy, p, theta));
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    pub fn shift(&self, x: i32, y: i32) -> Self {
        let mv = |p: Point| Point::new(p.x + x, p.y + y);
        Self {
            top_left: mv(self.top_left),
            top_right: mv(self.top_right),
            bottom_right: mv(self.bottom_right),
            bottom_left: mv(self.bottom_left),
        }
    }

    /// The four boundary segments, clockwise from the top edge.
    pub fn edges(&self) -> [(Point, Point); 4] {
        [
            (self.top_left, self.top_right),
            (self.top_right, self.bottom_right),
            (self.bottom_right, self.bottom_left),
            (self.bottom_left, self.top_left),
        ]
    }

    /// True if any boundary segment of `self` intersects any boundary segment of `other`.
    ///
    /// A quad nested entirely inside the other without touching it is not reported.
    pub fn overlaps(&self, other: &BoxCorners) -> bool {
        self.edges()
            .iter()
            .any(|&(a0, a1)| other.edges().iter().any(|&(b0, b1)| segments_intersect(a0, a1, b0, b1)))
    }
}

impl fmt::Display for BoxCorners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoxCorners({}, {}, {}, {})", self.top_left, self.top_right, self.bottom_right, self.bottom_left)
    }
}

#[inline]
fn mean(a: i32, b: i32) -> i32 {
    (a + b) / 2
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Typographic points to device pixels at `dpi`.
pub fn points_to_pixels(dpi: f64, points: f64) -> f64 {
    points * dpi / 72.0
}

/// Rotates `p` about `center` by `theta` radians, rounding to the nearest pixel.
pub fn rotate_coordinate(center: Point, p: Point, theta: f64) -> Point {
    rotate_about(f64::from(center.x), f64::from(center.y), p, theta)
}

fn rotate_about(cx: f64, cy: f64, p: Point, theta: f64) -> Point {
    let dx = f64::from(p.x) - cx;
    let dy = f64::from(p.y) - cy;
    let (sin, cos) = theta.sin_cos();
    let rx = dx * cos - dy * sin + cx;
    let ry = dx * sin + dy * cos + cy;
    Point::new(rx.round() as i32, ry.round() as i32)
}

fn orientation(p: Point, q: Point, r: Point) -> i64 {
    let v = (i64::from(q.x) - i64::from(p.x)) * (i64::from(r.y) - i64::from(p.y))
        - (i64::from(q.y) - i64::from(p.y)) * (i64::from(r.x) - i64::from(p.x));
    v.signum()
}

// q lies within the bounding box of p..r; only meaningful when the three are collinear
fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x >= p.x.min(r.x) && q.x <= p.x.max(r.x) && q.y >= p.y.min(r.y) && q.y <= p.y.max(r.y)
}

/// Segment–segment intersection, touching and collinear overlap included.
pub fn segments_intersect(a0: Point, a1: Point, b0: Point, b1: Point) -> bool {
    let o1 = orientation(a0, a1, b0);
    let o2 = orientation(a0, a1, b1);
    let o3 = orientation(b0, b1, a0);
    let o4 = orientation(b0, b1, a1);

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == 0 && on_segment(a0, b0, a1))
        || (o2 == 0 && on_segment(a0, b1, a1))
        || (o3 == 0 && on_segment(b0, a0, b1))
        || (o4 == 0 && on_segment(b0, a1, b1))
}
