mod headless;
mod primitives;
mod raster;
mod resources;
mod scheduler;

pub use headless::HeadlessSurface;
pub use primitives::{Color, Viewport};
pub use raster::RasterSurface;
pub use resources::{GeometryHandle, MaterialHandle, ResourcePool};
pub use scheduler::{FrameRequestId, HostScheduler, ResizeToken};

use image::RgbaImage;

use crate::error::ChartResult;
use crate::scene::Scene;

/// Contract the hosting environment provides for the engine to draw into.
///
/// A surface bundles the three host capabilities the engine relies on (a
/// sizeable container, a frame-scheduling primitive, a resize-notification
/// primitive) plus pixel capture for the export pipeline and the registry
/// of GPU-side resources living behind the binding. No specific windowing
/// system is assumed beyond these.
pub trait RenderSurface {
    fn viewport(&self) -> Viewport;

    /// Updates the backing store to new pixel dimensions.
    fn set_pixel_size(&mut self, viewport: Viewport);

    /// Binds the drawable to its host container.
    fn attach(&mut self);

    /// Detaches and releases the drawable from its host container.
    fn detach(&mut self);

    fn subscribe_resize(&mut self) -> ResizeToken;

    fn unsubscribe_resize(&mut self, token: ResizeToken);

    /// Asks the host to deliver one frame callback; the host later invokes
    /// `BarSceneEngine::on_frame` once per granted ticket.
    fn request_frame(&mut self) -> FrameRequestId;

    /// Cancels a granted, not-yet-delivered frame callback.
    fn cancel_frame(&mut self, request: FrameRequestId);

    /// Issues one draw of the scene.
    fn draw(&mut self, scene: &Scene) -> ChartResult<()>;

    /// Rasterizes the currently visible content.
    fn capture(&self) -> ChartResult<RgbaImage>;

    fn resources(&self) -> &ResourcePool;

    fn resources_mut(&mut self) -> &mut ResourcePool;
}
