//! Pure domain types with minimal dependencies
//!
//! Types here know nothing about drawing surfaces or hosts.

pub mod annotation;
pub mod geometry;
pub mod options;

pub use annotation::*;
pub use geometry::*;
pub use options::*;
