pub mod svg_surface;
pub mod transition;

pub use svg_surface::*;
pub use transition::*;
