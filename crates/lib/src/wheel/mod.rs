//! Wheel assembly.
//!
//! The package ships a compiled backend but no interpreter-specific
//! extension, so its wheels are universal in the Python tag and concrete in
//! the platform tag.

pub mod archive;
pub mod tag;

pub use archive::{DistInfo, WheelError, build_wheel, normalize_dist_name, wheel_file_name};
pub use tag::WheelTag;
