pub mod builder;
pub mod extrusion;
pub mod obj;
pub mod stl;
pub mod triangulation;
pub mod validation;

pub use builder::Triangle;
pub use extrusion::{extrude_shape, plane_shape, side_walls};
pub use obj::{write_mtl, write_obj};
pub use stl::{estimate_stl_size, write_stl};
pub use triangulation::triangulate_shape;
pub use validation::{ValidationReport, scrub_mesh};
