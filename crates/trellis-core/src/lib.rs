//! Trellis Core — graph model, path normalization, walk primitive, and
//! post-scan analytics

pub mod color;
pub mod graph;
pub mod model;
pub mod path;
pub mod post;


pub use color::{ColorGen, HOTSPOT_COLOR, ROOT_COLOR, TARGET_COLOR};
pub use graph::{EdgeIndex, Graph, NodeIndex};
pub use model::{DEFAULT_LAYER, EdgeData, Node};
pub use path::{PathObj, basename, dirname, normalize, relative_to};
pub use post::{PostOptions, apply_edge_colors, calculate_hotspots, post_process, restrict_to_paths_to};
