//! Timeline aggregate: per-minute tweet-count buckets.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
