pub mod area;
pub mod projection;
pub mod simplify;

pub use area::polygon_area;
pub use projection::{EARTH_RADIUS, GeoBounds, Projection};
pub use simplify::{simplify_collection, simplify_feature, simplify_path, simplify_ring};
