mod adapter;
mod backend;
mod captured_image;
mod capturer;
#[cfg(windows)]
mod d3d9;
mod device_cache;
mod engine;
mod error;
mod geometry;
#[cfg(test)]
mod mock;
mod options;
mod region;
mod window;

pub use adapter::*;
pub use backend::*;
pub use captured_image::*;
pub use capturer::*;
#[cfg(windows)]
pub use d3d9::*;
pub use device_cache::*;
pub use engine::*;
pub use error::*;
pub use geometry::*;
pub use options::*;
pub use region::*;
pub use window::*;
