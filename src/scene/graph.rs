use glam::Vec3;
use smallvec::{smallvec, SmallVec};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, GeometryHandle, MaterialHandle, ResourcePool};

use super::bars::{BarLayout, BAR_FOOTPRINT};
use super::camera::OrbitCamera;

/// Scene clear color.
pub const BACKGROUND: Color = Color::from_rgb8(0xf8, 0xfa, 0xfc);
/// Bar material color.
pub const BAR_COLOR: Color = Color::from_rgb8(0x3b, 0x82, 0xf6);
/// Axis reference line color.
pub const AXIS_COLOR: Color = Color::from_rgb8(0x66, 0x66, 0x66);

const GRID_MAJOR: Color = Color::from_rgb8(0x3b, 0x82, 0xf6);
const GRID_MINOR: Color = Color::from_rgb8(0xe5, 0xe7, 0xeb);
const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

/// Light source owned by one mount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f64,
    },
    Directional {
        color: Color,
        intensity: f64,
        position: Vec3,
        cast_shadows: bool,
    },
}

/// Ground reference grid, preserved across reconfigurations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlane {
    pub size: f64,
    pub divisions: u32,
    pub major_color: Color,
    pub minor_color: Color,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
}

/// One renderable box, one per data row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarMesh {
    pub index: usize,
    pub normalized_height: f64,
    pub position: Vec3,
    pub footprint: f64,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
}

/// Reference line segment along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLine {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Color,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
}

/// The full set of graphical primitives owned by one mount of the 3D
/// engine: camera, lights, grid, bar meshes and axis lines.
///
/// A scene and its surface binding are created and destroyed together; it
/// is never shared across mount cycles.
#[derive(Debug)]
pub struct Scene {
    pub background: Color,
    pub camera: OrbitCamera,
    pub lights: SmallVec<[Light; 2]>,
    pub grid: GridPlane,
    pub bars: Vec<BarMesh>,
    pub axis_lines: SmallVec<[AxisLine; 2]>,
}

impl Scene {
    /// Allocates camera, lights and grid. Bars and axis lines are populated
    /// by `rebuild_bars`.
    #[must_use]
    pub fn new(aspect: f32, pool: &mut ResourcePool) -> Self {
        let lights = smallvec![
            Light::Ambient {
                color: WHITE,
                intensity: 0.6,
            },
            Light::Directional {
                color: WHITE,
                intensity: 0.8,
                position: Vec3::new(10.0, 20.0, 10.0),
                cast_shadows: true,
            },
        ];
        Self {
            background: BACKGROUND,
            camera: OrbitCamera::new(aspect),
            lights,
            grid: GridPlane {
                size: 20.0,
                divisions: 20,
                major_color: GRID_MAJOR,
                minor_color: GRID_MINOR,
                geometry: pool.alloc_geometry(),
                material: pool.alloc_material(),
            },
            bars: Vec::new(),
            axis_lines: SmallVec::new(),
        }
    }

    /// Replaces the whole bar set and both axis lines for a new
    /// configuration.
    ///
    /// The previous generation is released and removed before the new one
    /// is allocated, so at no point do two generations coexist in the
    /// graph. Camera, lights and grid are untouched.
    pub fn rebuild_bars(&mut self, layouts: &[BarLayout], pool: &mut ResourcePool) {
        self.clear_bars(pool);

        for layout in layouts {
            self.bars.push(BarMesh {
                index: layout.index,
                normalized_height: layout.normalized_height,
                position: Vec3::new(
                    layout.offset as f32,
                    (layout.normalized_height / 2.0) as f32,
                    0.0,
                ),
                footprint: BAR_FOOTPRINT,
                cast_shadows: true,
                receive_shadows: true,
                geometry: pool.alloc_geometry(),
                material: pool.alloc_material(),
            });
        }

        self.axis_lines.push(AxisLine {
            from: Vec3::new(-10.0, 0.0, 0.0),
            to: Vec3::new(10.0, 0.0, 0.0),
            color: AXIS_COLOR,
            geometry: pool.alloc_geometry(),
            material: pool.alloc_material(),
        });
        self.axis_lines.push(AxisLine {
            from: Vec3::ZERO,
            to: Vec3::new(0.0, 12.0, 0.0),
            color: AXIS_COLOR,
            geometry: pool.alloc_geometry(),
            material: pool.alloc_material(),
        });
    }

    /// Releases bar and axis-line resources and removes them from the
    /// graph.
    pub fn clear_bars(&mut self, pool: &mut ResourcePool) {
        for bar in self.bars.drain(..) {
            pool.release_geometry(bar.geometry);
            pool.release_material(bar.material);
        }
        for line in self.axis_lines.drain(..) {
            pool.release_geometry(line.geometry);
            pool.release_material(line.material);
        }
    }

    /// Releases everything the scene still holds, grid included.
    pub fn release_all(&mut self, pool: &mut ResourcePool) {
        self.clear_bars(pool);
        pool.release_geometry(self.grid.geometry);
        pool.release_material(self.grid.material);
    }

    /// Structural validation run by drawing backends before a frame is
    /// issued.
    pub fn validate(&self) -> ChartResult<()> {
        for bar in &self.bars {
            if !bar.normalized_height.is_finite() || !bar.position.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "bar {} has non-finite geometry",
                    bar.index
                )));
            }
        }
        Ok(())
    }
}
