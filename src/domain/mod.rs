mod filters;
mod geometry;
mod registry;
mod route;
mod types;

pub use filters::*;
pub use geometry::*;
pub use registry::*;
pub use route::*;
pub use types::*;
