use tracing::debug;

use crate::data::CellValue;
use crate::error::ChartResult;
use crate::render::{FrameRequestId, RenderSurface, ResizeToken, Viewport};

use super::bars::layout_bars;
use super::graph::Scene;

/// Externally observable lifecycle phase of the 3D engine.
///
/// Initializing, reconfiguring and disposing are transient within single
/// calls; between calls the engine is either unmounted or running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Unmounted,
    Running,
}

/// Outcome of a mount attempt.
///
/// `Skipped` hands the surface back untouched; an unmet precondition is a
/// user-correctable state, not a fault.
#[derive(Debug)]
pub enum MountOutcome<S> {
    Mounted,
    Skipped(S),
}

impl<S> MountOutcome<S> {
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        matches!(self, Self::Mounted)
    }
}

/// Ownership record for one mount: everything initialization allocated and
/// disposal must drain.
#[derive(Debug)]
struct MountRecord<S> {
    surface: S,
    scene: Scene,
    resize_token: ResizeToken,
    pending_frame: Option<FrameRequestId>,
}

/// Stateful 3D bar scene engine.
///
/// Owns a scene graph, an orbiting camera, lighting and the binding to one
/// host rendering surface. Lifecycle:
/// unmounted → running → (reconfigured)* → disposed → unmounted. Disposal
/// is idempotent, and stale frame or resize callbacks delivered after
/// disposal are absorbed as no-ops.
#[derive(Debug)]
pub struct BarSceneEngine<S: RenderSurface> {
    mount: Option<MountRecord<S>>,
}

impl<S: RenderSurface> Default for BarSceneEngine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RenderSurface> BarSceneEngine<S> {
    #[must_use]
    pub fn new() -> Self {
        Self { mount: None }
    }

    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        if self.mount.is_some() {
            EnginePhase::Running
        } else {
            EnginePhase::Unmounted
        }
    }

    /// First attach to a rendering surface.
    ///
    /// Preconditions: the engine is unmounted, the surface has a sizeable
    /// viewport and both data series are non-empty. When unmet the engine
    /// silently stays unmounted and hands the surface back. On success the
    /// surface is attached, the resize subscription registered, the scene
    /// built and the first frame requested.
    pub fn mount(
        &mut self,
        mut surface: S,
        x_data: &[CellValue],
        y_data: &[CellValue],
    ) -> MountOutcome<S> {
        if self.mount.is_some()
            || !surface.viewport().is_valid()
            || x_data.is_empty()
            || y_data.is_empty()
        {
            debug!("3d mount skipped: precondition not met");
            return MountOutcome::Skipped(surface);
        }

        surface.attach();
        let resize_token = surface.subscribe_resize();
        let aspect = surface.viewport().aspect_ratio() as f32;
        let mut scene = Scene::new(aspect, surface.resources_mut());

        let layouts = layout_bars(x_data, y_data);
        scene.rebuild_bars(&layouts, surface.resources_mut());

        let pending_frame = Some(surface.request_frame());
        self.mount = Some(MountRecord {
            surface,
            scene,
            resize_token,
            pending_frame,
        });
        debug!(bars = layouts.len(), "3d bar scene mounted");
        MountOutcome::Mounted
    }

    /// Swaps in a new (x, y) configuration while mounted.
    ///
    /// The previous bar set and axis lines are fully released before the
    /// new generation is built; camera, lights and grid carry over. A call
    /// on an unmounted engine is absorbed.
    pub fn reconfigure(&mut self, x_data: &[CellValue], y_data: &[CellValue]) {
        let Some(mount) = self.mount.as_mut() else {
            return;
        };
        let layouts = layout_bars(x_data, y_data);
        mount
            .scene
            .rebuild_bars(&layouts, mount.surface.resources_mut());
        debug!(bars = layouts.len(), "3d bar scene reconfigured");
    }

    /// One frame callback from the host scheduler.
    ///
    /// Stale callbacks delivered after disposal are no-ops. While running:
    /// advance the orbit, issue one draw, re-request the next frame. The
    /// per-frame work is fixed-size apart from the O(bars) draw itself.
    pub fn on_frame(&mut self) -> ChartResult<()> {
        let Some(mount) = self.mount.as_mut() else {
            return Ok(());
        };
        mount.pending_frame = None;
        mount.scene.camera.advance_orbit();
        mount.surface.draw(&mount.scene)?;
        mount.pending_frame = Some(mount.surface.request_frame());
        Ok(())
    }

    /// Size-change notification from the host.
    ///
    /// Updates the camera aspect ratio and the surface pixel dimensions;
    /// notifications arriving after disposal are absorbed.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        let Some(mount) = self.mount.as_mut() else {
            return;
        };
        let viewport = Viewport::new(width, height);
        if !viewport.is_valid() {
            return;
        }
        mount
            .scene
            .camera
            .set_aspect(viewport.aspect_ratio() as f32);
        mount.surface.set_pixel_size(viewport);
    }

    /// Tears the mount down: cancels any pending frame, unregisters the
    /// resize subscription, detaches the surface binding and releases every
    /// GPU-side handle the scene held.
    ///
    /// Idempotent: the first call returns the drained surface, later calls
    /// return `None` and do nothing.
    pub fn dispose(&mut self) -> Option<S> {
        let mut mount = self.mount.take()?;
        if let Some(request) = mount.pending_frame.take() {
            mount.surface.cancel_frame(request);
        }
        mount.surface.unsubscribe_resize(mount.resize_token);
        mount.surface.detach();
        mount.scene.release_all(mount.surface.resources_mut());
        debug!("3d bar scene disposed");
        Some(mount.surface)
    }

    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        self.mount.as_ref().map(|mount| &mount.scene)
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.mount.as_ref().map(|mount| &mount.surface)
    }

    #[must_use]
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.mount.as_mut().map(|mount| &mut mount.surface)
    }

    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.scene().map_or(0, |scene| scene.bars.len())
    }
}
