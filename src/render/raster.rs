use glam::{Mat4, Vec2, Vec3};
use image::{Rgba, RgbaImage};

use crate::error::{ChartError, ChartResult};
use crate::scene::{BarMesh, Light, Scene, BACKGROUND, BAR_COLOR};

use super::scheduler::{FrameRequestId, HostScheduler, ResizeToken};
use super::{Color, RenderSurface, ResourcePool, Viewport};

/// Software rasterizing surface backed by an RGBA framebuffer.
///
/// Draws the scene with flat-shaded bar faces in painter order plus grid
/// and axis lines. It exists so `capture` yields real pixels for the
/// export pipeline without assuming a GPU; a host with its own backend
/// only needs to satisfy `RenderSurface`.
#[derive(Debug)]
pub struct RasterSurface {
    buffer: RgbaImage,
    scheduler: HostScheduler,
    pool: ResourcePool,
    attached: bool,
}

impl RasterSurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: RgbaImage::from_pixel(width, height, rgba(BACKGROUND)),
            scheduler: HostScheduler::default(),
            pool: ResourcePool::default(),
            attached: false,
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Drains granted frame tickets so the host can deliver them.
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

    fn draw_bar(&mut self, view_proj: &Mat4, bar: &BarMesh, lights: &[Light]) {
        let half = (bar.footprint / 2.0) as f32;
        let height = bar.normalized_height as f32;
        let (y0, y1) = if height >= 0.0 {
            (0.0, height)
        } else {
            (height, 0.0)
        };
        let (cx, cz) = (bar.position.x, bar.position.z);

        // Eight box corners, bottom ring then top ring.
        let corner = |dx: f32, y: f32, dz: f32| Vec3::new(cx + dx, y, cz + dz);
        let faces = [
            // top
            (
                [
                    corner(-half, y1, -half),
                    corner(half, y1, -half),
                    corner(half, y1, half),
                    corner(-half, y1, half),
                ],
                Vec3::Y,
            ),
            // +x side
            (
                [
                    corner(half, y0, -half),
                    corner(half, y0, half),
                    corner(half, y1, half),
                    corner(half, y1, -half),
                ],
                Vec3::X,
            ),
            // -x side
            (
                [
                    corner(-half, y0, half),
                    corner(-half, y0, -half),
                    corner(-half, y1, -half),
                    corner(-half, y1, half),
                ],
                Vec3::NEG_X,
            ),
            // +z side
            (
                [
                    corner(half, y0, half),
                    corner(-half, y0, half),
                    corner(-half, y1, half),
                    corner(half, y1, half),
                ],
                Vec3::Z,
            ),
            // -z side
            (
                [
                    corner(-half, y0, -half),
                    corner(half, y0, -half),
                    corner(half, y1, -half),
                    corner(-half, y1, -half),
                ],
                Vec3::NEG_Z,
            ),
        ];

        for (corners, normal) in faces {
            let shaded = shade(BAR_COLOR, normal, lights);
            let mut projected = [Vec2::ZERO; 4];
            let mut visible = true;
            for (slot, corner) in projected.iter_mut().zip(corners) {
                match project(view_proj, self.buffer.dimensions(), corner) {
                    Some(point) => *slot = point,
                    None => {
                        visible = false;
                        break;
                    }
                }
            }
            if visible {
                fill_convex_quad(&mut self.buffer, &projected, shaded);
            }
        }
    }
}

impl RenderSurface for RasterSurface {
    fn viewport(&self) -> Viewport {
        let (width, height) = self.buffer.dimensions();
        Viewport::new(width, height)
    }

    fn set_pixel_size(&mut self, viewport: Viewport) {
        self.buffer = RgbaImage::from_pixel(viewport.width, viewport.height, rgba(BACKGROUND));
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
        let (width, height) = self.buffer.dimensions();
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidViewport { width, height });
        }

        let background = rgba(scene.background);
        for pixel in self.buffer.pixels_mut() {
            *pixel = background;
        }

        let view_proj = scene.camera.projection_matrix() * scene.camera.view_matrix();

        // Ground grid, center lines in the major color.
        let half = (scene.grid.size / 2.0) as f32;
        let step = (scene.grid.size / f64::from(scene.grid.divisions)) as f32;
        for i in 0..=scene.grid.divisions {
            let t = -half + step * i as f32;
            let color = if i * 2 == scene.grid.divisions {
                scene.grid.major_color
            } else {
                scene.grid.minor_color
            };
            self.draw_world_line(&view_proj, Vec3::new(t, 0.0, -half), Vec3::new(t, 0.0, half), color);
            self.draw_world_line(&view_proj, Vec3::new(-half, 0.0, t), Vec3::new(half, 0.0, t), color);
        }

        for line in &scene.axis_lines {
            self.draw_world_line(&view_proj, line.from, line.to, line.color);
        }

        // Painter order: far bars first.
        let eye = scene.camera.position;
        let mut order: Vec<usize> = (0..scene.bars.len()).collect();
        order.sort_by(|a, b| {
            let da = scene.bars[*a].position.distance_squared(eye);
            let db = scene.bars[*b].position.distance_squared(eye);
            db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
        });
        for index in order {
            self.draw_bar(&view_proj, &scene.bars[index], &scene.lights);
        }

        Ok(())
    }

    fn capture(&self) -> ChartResult<RgbaImage> {
        let (width, height) = self.buffer.dimensions();
        if width == 0 || height == 0 {
            return Err(ChartError::Capture(
                "surface has no backing store".to_owned(),
            ));
        }
        Ok(self.buffer.clone())
    }

    fn resources(&self) -> &ResourcePool {
        &self.pool
    }

    fn resources_mut(&mut self) -> &mut ResourcePool {
        &mut self.pool
    }
}

impl RasterSurface {
    fn draw_world_line(&mut self, view_proj: &Mat4, from: Vec3, to: Vec3, color: Color) {
        let dimensions = self.buffer.dimensions();
        let (Some(a), Some(b)) = (
            project(view_proj, dimensions, from),
            project(view_proj, dimensions, to),
        ) else {
            return;
        };
        draw_screen_line(&mut self.buffer, a, b, rgba(color));
    }
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba(color.to_rgba8())
}

/// Projects a world-space point to screen space; points behind the eye are
/// discarded.
fn project(view_proj: &Mat4, dimensions: (u32, u32), point: Vec3) -> Option<Vec2> {
    let clip = *view_proj * point.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    let (width, height) = dimensions;
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * width as f32,
        (1.0 - ndc.y) * 0.5 * height as f32,
    ))
}

fn shade(base: Color, normal: Vec3, lights: &[Light]) -> Rgba<u8> {
    let mut intensity = 0.0_f64;
    for light in lights {
        match light {
            Light::Ambient { intensity: amount, .. } => intensity += amount,
            Light::Directional {
                intensity: amount,
                position,
                ..
            } => {
                let direction = position.normalize_or_zero();
                intensity += amount * f64::from(normal.dot(direction).max(0.0));
            }
        }
    }
    let intensity = intensity.clamp(0.0, 1.0);
    Rgba(
        Color::rgba(
            base.red * intensity,
            base.green * intensity,
            base.blue * intensity,
            1.0,
        )
        .to_rgba8(),
    )
}

fn put_pixel(buffer: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    let (width, height) = buffer.dimensions();
    if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
        buffer.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_screen_line(buffer: &mut RgbaImage, a: Vec2, b: Vec2, color: Rgba<u8>) {
    let delta = b - a;
    let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0);
    for i in 0..=steps as i64 {
        let t = i as f32 / steps;
        let point = a + delta * t;
        put_pixel(buffer, point.x.floor() as i64, point.y.floor() as i64, color);
    }
}

/// Scanline fill of a convex quad given in screen space.
fn fill_convex_quad(buffer: &mut RgbaImage, corners: &[Vec2; 4], color: Rgba<u8>) {
    let min_y = corners
        .iter()
        .map(|c| c.y)
        .fold(f32::INFINITY, f32::min)
        .floor()
        .max(0.0) as i64;
    let max_y = corners
        .iter()
        .map(|c| c.y)
        .fold(f32::NEG_INFINITY, f32::max)
        .ceil() as i64;

    for y in min_y..=max_y {
        let scan = y as f32 + 0.5;
        let mut crossings: Vec<f32> = Vec::with_capacity(4);
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            if (a.y <= scan) != (b.y <= scan) {
                crossings.push(a.x + (scan - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        if crossings.len() < 2 {
            continue;
        }
        crossings.sort_by(|left, right| left.partial_cmp(right).unwrap_or(std::cmp::Ordering::Equal));
        let start = crossings[0].floor() as i64;
        let end = crossings[crossings.len() - 1].ceil() as i64;
        for x in start..end {
            put_pixel(buffer, x, y, color);
        }
    }
}
