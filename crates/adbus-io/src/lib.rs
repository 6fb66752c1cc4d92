//! # adbus-io: File and Standard-Input Parsers
//!
//! Everything that turns the external, line-oriented input formats into
//! [`adbus_core::Region`]/[`adbus_core::Route`] values: the five-line
//! standard-input protocol, the regions and routes feature files, and the
//! activity-factors CSV.
//!
//! None of these parsers retry or recover from malformed input — every
//! failure is one of the three fatal categories in [`adbus_core::AdbusError`],
//! and the caller's only correct response is to log and exit.

pub mod activity;
pub mod region;
pub mod route;
pub mod stdin;
pub mod tokenizer;

pub use activity::parse_activity_factors;
pub use region::parse_regions;
pub use route::parse_routes;
pub use stdin::{parse_target_ages, read_stdin_request, StdinRequest};
