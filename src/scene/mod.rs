//! The 3D bar scene engine: scene graph, orbiting camera and the mount /
//! reconfigure / dispose lifecycle bound to one host rendering surface.

mod bars;
mod camera;
mod engine;
mod graph;

pub use bars::{layout_bars, BarLayout, BAR_FOOTPRINT, BAR_SPACING, HEIGHT_SCALE, MAX_BARS};
pub use camera::{OrbitCamera, ORBIT_HEIGHT, ORBIT_RADIUS, ORBIT_STEP};
pub use engine::{BarSceneEngine, EnginePhase, MountOutcome};
pub use graph::{AxisLine, BarMesh, GridPlane, Light, Scene, AXIS_COLOR, BACKGROUND, BAR_COLOR};
