use tabchart::data::CellValue;
use tabchart::render::{RasterSurface, RenderSurface, Viewport};
use tabchart::scene::{BarSceneEngine, BACKGROUND};

fn numbers(values: &[f64]) -> Vec<CellValue> {
    values.iter().map(|value| CellValue::Number(*value)).collect()
}

fn drive_one_frame(engine: &mut BarSceneEngine<RasterSurface>) {
    let tickets = engine
        .surface_mut()
        .expect("engine is mounted")
        .take_pending_frames();
    assert!(!tickets.is_empty());
    engine.on_frame().expect("frame draws cleanly");
}

#[test]
fn capture_matches_the_surface_dimensions() {
    let surface = RasterSurface::new(320, 200);
    let raster = surface.capture().expect("backing store exists");
    assert_eq!(raster.dimensions(), (320, 200));
    assert_eq!(surface.viewport(), Viewport::new(320, 200));
}

#[test]
fn a_drawn_frame_clears_to_the_scene_background() {
    let data = numbers(&[1.0, 2.0, 3.0]);
    let mut engine = BarSceneEngine::new();
    engine.mount(RasterSurface::new(200, 150), &data, &data);
    drive_one_frame(&mut engine);

    let raster = engine
        .surface()
        .expect("engine is mounted")
        .capture()
        .expect("capture succeeds");
    // Corners lie outside the grid and bars, so they stay background.
    let corner = raster.get_pixel(0, 0);
    assert_eq!(corner.0, BACKGROUND.to_rgba8());
    engine.dispose();
}

#[test]
fn bars_leave_non_background_pixels_in_the_frame() {
    let data = numbers(&[5.0, 10.0, 7.0]);
    let mut engine = BarSceneEngine::new();
    engine.mount(RasterSurface::new(400, 300), &data, &data);
    drive_one_frame(&mut engine);

    let raster = engine
        .surface()
        .expect("engine is mounted")
        .capture()
        .expect("capture succeeds");
    let background = BACKGROUND.to_rgba8();
    let foreground = raster
        .pixels()
        .filter(|pixel| pixel.0 != background)
        .count();
    assert!(foreground > 0, "scene content should reach the framebuffer");
    engine.dispose();
}

#[test]
fn an_empty_scene_still_draws_grid_and_nothing_fails() {
    // All-text y series builds zero bars but the frame must still clear.
    let x = numbers(&[1.0, 2.0]);
    let y = vec![
        CellValue::Text("a".to_owned()),
        CellValue::Text("b".to_owned()),
    ];
    let mut engine = BarSceneEngine::new();
    engine.mount(RasterSurface::new(160, 120), &x, &y);
    assert_eq!(engine.bar_count(), 0);
    drive_one_frame(&mut engine);
    engine.dispose();
}

#[test]
fn resizing_recreates_the_backing_store() {
    let data = numbers(&[1.0, 2.0]);
    let mut engine = BarSceneEngine::new();
    engine.mount(RasterSurface::new(200, 100), &data, &data);

    engine.on_resize(640, 480);
    let raster = engine
        .surface()
        .expect("engine is mounted")
        .capture()
        .expect("capture succeeds");
    assert_eq!(raster.dimensions(), (640, 480));
    engine.dispose();
}
