#![allow(dead_code)]

use heart_scratch::surface::{StrokeStyle, Surface};
use heart_scratch::{
    Color, DisplayRect, HeartWidget, InputEvent, Point, SurfaceSize, WidgetConfig,
};
use std::time::Duration;

/// Surface double that remembers every drawing call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Option<SurfaceSize>,
    pub rects: Vec<(i32, i32, u32, u32, Color)>,
    pub polygons: usize,
    pub strokes: usize,
    pub clears: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { size: Some(SurfaceSize::new(width, height)), ..Default::default() }
    }

    /// 1x1 rects are only drawn by the full-heart fill.
    pub fn single_pixel_rects(&self) -> usize {
        self.rects.iter().filter(|r| r.2 == 1 && r.3 == 1).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size.unwrap_or(SurfaceSize::new(0, 0))
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = Some(size);
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        self.rects.push((x, y, w, h, color));
    }

    fn fill_polygon(&mut self, _points: &[Point], _color: Color) {
        self.polygons += 1;
    }

    fn stroke_polygon(&mut self, _points: &[Point], _style: &StrokeStyle) {
        self.strokes += 1;
    }
}

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

pub fn classic_widget() -> HeartWidget<RecordingSurface> {
    HeartWidget::new(
        WidgetConfig { rain_seed: Some(1), ..WidgetConfig::default() },
        RecordingSurface::new(400, 350),
        DisplayRect::new(0.0, 0.0, 400.0, 350.0),
    )
    .expect("valid config")
}

/// Drag the pointer over the whole heart in a raster; returns the time of
/// the event that completed the heart, if any.
pub fn scratch_everything<S: Surface>(widget: &mut HeartWidget<S>, start: Duration) -> Option<Duration> {
    let mut now = start;
    let mut completed_at = None;
    widget.handle(&InputEvent::MouseDown(Point::new(200.0, 195.0)), now);
    for y in (90..280).step_by(6) {
        for x in (80..320).step_by(6) {
            now += ms(1);
            let out = widget.handle(&InputEvent::MouseMove(Point::new(x as f64, y as f64)), now);
            if out.is_some_and(|o| o.completed) {
                completed_at = Some(now);
            }
        }
    }
    widget.handle(&InputEvent::MouseUp, now);
    completed_at
}
