//! Export of pipe geometry for renderers.

mod svg;

pub use svg::{
    pipe_to_svg_path, polygon_to_svg_path, polygons_to_svg_path, polyline_to_svg_path,
    ring_to_svg_path,
};
