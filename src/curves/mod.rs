//! Curve interpolation through control points.

mod catmull_rom;

pub use catmull_rom::{interpolate, CatmullRom2};
