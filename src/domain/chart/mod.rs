//! Chart aggregate: scales, layout, bar reconciliation and transitions.

pub mod animation;
pub mod entities;
pub mod reconcile;
pub mod services;
pub mod value_objects;

pub use animation::*;
pub use entities::*;
pub use reconcile::*;
pub use services::*;
pub use value_objects::*;
