use image::{Rgba, RgbaImage};

use crate::error::{ChartError, ChartResult};
use crate::scene::Scene;

use super::scheduler::{FrameRequestId, HostScheduler, ResizeToken};
use super::{RenderSurface, ResourcePool, Viewport};

/// Validating no-op surface used by tests and headless hosts.
///
/// It still validates scene content on every draw so tests catch degenerate
/// geometry before a real backend is introduced, and it exposes the
/// scheduler bookkeeping so the frame loop can be driven by hand.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    viewport: Viewport,
    scheduler: HostScheduler,
    pool: ResourcePool,
    attached: bool,
    draw_count: usize,
    last_bar_count: usize,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    #[must_use]
    pub fn last_bar_count(&self) -> usize {
        self.last_bar_count
    }

    /// Drains granted frame tickets so a test host can deliver them.
    pub fn take_pending_frames(&mut self) -> Vec<FrameRequestId> {
        self.scheduler.take_pending_frames()
    }

    #[must_use]
    pub fn pending_frame_count(&self) -> usize {
        self.scheduler.pending_frame_count()
    }

    #[must_use]
    pub fn active_resize_subscriptions(&self) -> usize {
        self.scheduler.active_subscriptions()
    }

    #[must_use]
    pub fn stray_frame_cancels(&self) -> usize {
        self.scheduler.stray_cancels()
    }
}

impl RenderSurface for HeadlessSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_pixel_size(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn subscribe_resize(&mut self) -> ResizeToken {
        self.scheduler.subscribe()
    }

    fn unsubscribe_resize(&mut self, token: ResizeToken) {
        self.scheduler.unsubscribe(token);
    }

    fn request_frame(&mut self) -> FrameRequestId {
        self.scheduler.grant_frame()
    }

    fn cancel_frame(&mut self, request: FrameRequestId) {
        self.scheduler.cancel_frame(request);
    }

    fn draw(&mut self, scene: &Scene) -> ChartResult<()> {
        scene.validate()?;
        self.draw_count += 1;
        self.last_bar_count = scene.bars.len();
        Ok(())
    }

    fn capture(&self) -> ChartResult<RgbaImage> {
        if !self.viewport.is_valid() {
            return Err(ChartError::Capture(
                "surface has no backing store".to_owned(),
            ));
        }
        Ok(RgbaImage::from_pixel(
            self.viewport.width,
            self.viewport.height,
            Rgba([0, 0, 0, 0]),
        ))
    }

    fn resources(&self) -> &ResourcePool {
        &self.pool
    }

    fn resources_mut(&mut self) -> &mut ResourcePool {
        &mut self.pool
    }
}
