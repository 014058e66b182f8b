pub mod config;
pub mod css;
pub mod geometry;
pub mod id;
pub mod model;

pub use config::CanvasConfig;
pub use geometry::{
    Position, adjust_element_coordinates, distance, mid_point_btw, resized_coordinates,
};
pub use id::ElementId;
pub use model::*;

// Re-export kurbo's point so downstream crates don't need a direct dependency
pub use kurbo::Point;
