//! # adbus-core: Domain Model and Geometry Primitives
//!
//! Core data types for the bus-route wrap-advertising budget allocator:
//! 2D geometry primitives (`Point`, `BBox`), the `Region`/`Route` entity
//! records, a string-backed identifier newtype, and the unified error and
//! diagnostics infrastructure shared by the rest of the workspace.
//!
//! ## Design Philosophy
//!
//! **Leaf crate**: `adbus-core` has no dependency on `adbus-io` or
//! `adbus-algo`; geometry and intersection algorithms live in `adbus-algo`
//! and operate on the types defined here by reference.
//!
//! **Plain records, no hierarchy**: `Region` and `Route` are concrete
//! structs, not a type hierarchy — the domain only ever has these two entity
//! kinds (see the GLOSSARY).
//!
//! ## Modules
//!
//! - [`error`] - Unified error type (`AdbusError`) for the three fatal error
//!   categories the pipeline recognizes.
//! - [`diagnostics`] - Structured, severity-tagged diagnostic collection used
//!   by the parsers to report non-fatal anomalies.

pub mod diagnostics;
pub mod error;

pub use error::{AdbusError, AdbusResult};

use std::fmt;

/// Number of active timeslots that contribute to benefit accounting.
///
/// Timeslot 1 (the "always-zero sentinel slot" in the source data) is
/// dropped during parsing; internal index `0` corresponds to external slot
/// `2`, index `1` to slot `3`, index `2` to slot `4`.
pub const TIMESLOTS: usize = 3;

/// Fixed duration (in hours) of each active timeslot, in internal-index
/// order. Used when precomputing region targets (see the region-target
/// formula in the Intersector).
pub const SLOT_LENGTH: [f64; TIMESLOTS] = [2.0, 8.0, 4.0];

/// Tolerance used by `adbus_algo::geom::sign` for the straddle test. Exposed
/// here so both the geometry engine and any diagnostics/testing code agree
/// on the same constant.
pub const EPSILON: f64 = 1e-12;

/// An opaque identifier shared by `Region::mesh_id` and `Route::output_id`.
///
/// The reference implementation carries both integer and string id types
/// across its revisions; this newtype settles on a `String` backing so
/// numeric-looking and textual tokens both round-trip unchanged, while
/// still giving total, deterministic ordering for the ascending-by-id
/// output contract.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(String);

impl Id {
    /// Wrap a raw token as an identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier's underlying text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// An ordered pair of IEEE-754 doubles. No invariants beyond finiteness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True iff both components are finite (not NaN, not infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned bounding box, carried as `(min, max)` corner points.
///
/// An empty/unset box uses `min = (+inf, +inf)`, `max = (-inf, -inf)` as a
/// sentinel, so that pointwise extension via [`BBox::extend`] is idempotent
/// starting from [`BBox::empty`] regardless of insertion order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    /// The empty-box sentinel: extending it with any finite point yields a
    /// box containing exactly that point.
    pub fn empty() -> Self {
        Self {
            min: Point::new(f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Extend the box to cover `point`, in place.
    pub fn extend(&mut self, point: Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Compute the bounding box of a point sequence (e.g. a polygon ring or
    /// a polyline).
    pub fn of_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut b = Self::empty();
        for p in points {
            b.extend(*p);
        }
        b
    }
}

/// A demographic grid cell with a closed polygon footprint.
///
/// Built once during parsing and never mutated afterward; `targets` is
/// already pre-multiplied by activity factor and timeslot length, so the
/// Intersector only ever adds it verbatim.
#[derive(Debug, Clone)]
pub struct Region {
    pub mesh_id: Id,
    /// Per-timeslot expected-impression contribution, internal index order.
    pub targets: [f64; TIMESLOTS],
    /// Closed polygon: `polygon[0] == polygon[last]`, at least 4 points.
    pub polygon: Vec<Point>,
    pub bbox: BBox,
}

impl Region {
    /// Construct a region from its polygon and precomputed targets,
    /// deriving the bounding box from the polygon.
    pub fn new(mesh_id: Id, targets: [f64; TIMESLOTS], polygon: Vec<Point>) -> Self {
        let bbox = BBox::of_points(polygon.iter());
        Self {
            mesh_id,
            targets,
            polygon,
            bbox,
        }
    }
}

/// A bus line; the unit of purchase.
///
/// Every field except `benefits` is set at parse time; `benefits` is filled
/// exactly once by the Intersector and is read-only to the Knapsack
/// thereafter.
#[derive(Debug, Clone)]
pub struct Route {
    pub output_id: Id,
    /// Cost per single bus purchased on this route. Positive.
    pub cost: f64,
    /// Non-negative integer caps, maximum buses deployable per timeslot.
    pub buses: [u32; TIMESLOTS],
    /// One or more point sequences (a route is a MultiLineString).
    pub polylines: Vec<Vec<Point>>,
    pub bbox: BBox,
    /// `benefits[k]` is the expected impressions from buying `k+1` buses.
    /// Empty until the Intersector runs.
    pub benefits: Vec<f64>,
}

impl Route {
    /// Construct a route from its polylines and per-slot caps, deriving the
    /// bounding box from all polyline points and leaving `benefits` empty
    /// until the Intersector populates it.
    pub fn new(
        output_id: Id,
        cost: f64,
        buses: [u32; TIMESLOTS],
        polylines: Vec<Vec<Point>>,
    ) -> Self {
        let bbox = BBox::of_points(polylines.iter().flatten());
        Self {
            output_id,
            cost,
            buses,
            polylines,
            bbox,
            benefits: Vec::new(),
        }
    }

    /// `m = max(buses)`: the route's maximum purchasable count, and the
    /// length the Intersector allocates for `benefits`.
    pub fn max_buses(&self) -> usize {
        self.buses.iter().copied().max().unwrap_or(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_ordering_is_string_order() {
        let a = Id::new("10");
        let b = Id::new("9");
        // string order, not numeric order — documented, not "fixed"
        assert!(a < b);
    }

    #[test]
    fn test_bbox_empty_extends_idempotently() {
        let mut b = BBox::empty();
        b.extend(Point::new(3.0, 4.0));
        assert_eq!(b.min, Point::new(3.0, 4.0));
        assert_eq!(b.max, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_bbox_of_points() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, -1.0),
            Point::new(1.0, 5.0),
        ];
        let b = BBox::of_points(pts.iter());
        assert_eq!(b.min, Point::new(0.0, -1.0));
        assert_eq!(b.max, Point::new(2.0, 5.0));
    }

    #[test]
    fn test_route_max_buses() {
        let route = Route::new(Id::new("R1"), 100.0, [0, 3, 2], vec![]);
        assert_eq!(route.max_buses(), 3);
    }

    #[test]
    fn test_route_max_buses_zero() {
        let route = Route::new(Id::new("R2"), 100.0, [0, 0, 0], vec![]);
        assert_eq!(route.max_buses(), 0);
    }

    #[test]
    fn test_point_sub() {
        let a = Point::new(5.0, 7.0);
        let b = Point::new(2.0, 3.0);
        assert_eq!(a - b, Point::new(3.0, 4.0));
    }
}
