//! # adbus-algo: Geometry, Benefit Aggregation, and Knapsack Optimization
//!
//! The three tightly coupled subsystems that do the engineering work of the
//! bus-route wrap-advertising allocator:
//!
//! - [`geom`] — line-segment/polygon intersection with a bounding-box
//!   prefilter. Pure, stateless.
//! - [`intersector`] — the route×region pass: bbox prefilter → precise
//!   intersection → benefit accumulation into each route's `benefits`
//!   vector.
//! - [`knapsack`] — a bounded-multiplicity dynamic program over the
//!   discretized budget axis, with a backtracking reconstruction of the
//!   purchase allocation.
//!
//! ## Example
//!
//! ```ignore
//! use adbus_algo::{intersector, knapsack};
//!
//! intersector::compute_benefits(&mut routes, &regions);
//! let allocation = knapsack::allocate(&routes, budget);
//! ```

pub mod geom;
pub mod intersector;
pub mod knapsack;

pub use intersector::compute_benefits;
pub use knapsack::allocate;
