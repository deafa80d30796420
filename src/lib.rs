//! tabchart turns uploaded tabular data into chart visualizations.
//!
//! The crate covers the full path from raw columns to pixels:
//!
//! - [`data`] holds uploaded column sets and stored chart configurations.
//! - [`model`] selects columns per a [`model::ChartSpec`] and produces
//!   either a ready chart model or an explicit placeholder.
//! - [`chart2d`] materializes renderer-ready payloads for the external 2D
//!   statistical charting capability.
//! - [`scene`] is the self-contained 3D bar engine: scene graph, orbiting
//!   camera and a mount / reconfigure / dispose lifecycle bound to one
//!   [`render::RenderSurface`].
//! - [`export`] captures the mounted surface to PNG or forwards it to a
//!   document-conversion collaborator.
//!
//! Rendering backends are pluggable through [`render::RenderSurface`]:
//! [`render::RasterSurface`] draws into a software framebuffer, while
//! [`render::HeadlessSurface`] records lifecycle traffic for tests.
//!
//! ```
//! use tabchart::render::HeadlessSurface;
//! use tabchart::scene::BarSceneEngine;
//! use tabchart::data::CellValue;
//!
//! let x = vec![CellValue::Text("a".into()), CellValue::Text("b".into())];
//! let y = vec![CellValue::Number(2.0), CellValue::Number(4.0)];
//!
//! let mut engine = BarSceneEngine::new();
//! engine.mount(HeadlessSurface::new(640, 480), &x, &y);
//! assert_eq!(engine.bar_count(), 2);
//! engine.dispose();
//! ```

pub mod chart2d;
pub mod data;
pub mod error;
pub mod export;
pub mod model;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use error::{ChartError, ChartResult};
pub use model::{build_chart_model, ChartKind, ChartModel, ChartSpec};
pub use scene::BarSceneEngine;
