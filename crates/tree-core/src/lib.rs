pub mod buffers;
pub mod camera;
pub mod constants;
pub mod control;
pub mod distribution;
pub mod error;
pub mod gesture;
pub mod mesh;
pub mod population;
pub mod pose;
pub mod progress;
pub mod scene;
pub mod stars;
pub mod transform;

pub use buffers::*;
pub use camera::*;
pub use constants::*;
pub use control::*;
pub use error::*;
pub use gesture::*;
pub use population::*;
pub use pose::*;
pub use progress::*;
pub use scene::*;
pub use stars::*;

// Shaders bundled as string constants
pub static FOLIAGE_WGSL: &str = include_str!("../shaders/foliage.wgsl");
pub static ORNAMENT_WGSL: &str = include_str!("../shaders/ornament.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
