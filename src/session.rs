//! Paint session: which cells of the heart have been scratched so far.
//!
//! The session owns the Marked Cell Set (insertion only) and the Shape Cell
//! Set (recomputed on resize), paints every newly marked cell the moment it is
//! marked and reports the first time the fill ratio reaches the completion
//! threshold. After that the session ignores all input for good.

use std::collections::HashSet;

use log::{debug, info, trace};

use crate::heart::HeartShape;
use crate::surface::Surface;
use crate::types::{Cell, Color, Point, SurfaceSize};

/// Result of applying one stroke.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrokeOutcome {
    /// Cells marked by this stroke that were not marked before.
    pub newly_marked: usize,
    /// Fill ratio after the stroke.
    pub fill_ratio: f64,
    /// True only for the stroke that completed the session.
    pub completed: bool,
}

/// How marked cells are painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkStyle {
    pub color: Color,
    /// Side of the square centered on each cell.
    pub size: u32,
}

pub struct PaintSession {
    shape: HeartShape,
    bounds: SurfaceSize,
    shape_cells: HashSet<Cell>,
    marked: HashSet<Cell>,
    brush_radius: u32,
    completion_ratio: f64,
    mark: MarkStyle,
    is_drawing: bool,
    is_completed: bool,
    fill_ratio: f64,
}

/// Round half up, the way pointer coordinates are snapped onto cells.
#[inline]
fn snap(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

impl PaintSession {
    pub fn new(
        shape: HeartShape,
        bounds: SurfaceSize,
        brush_radius: u32,
        completion_ratio: f64,
        mark: MarkStyle,
    ) -> Self {
        let shape_cells = shape.shape_cells(bounds);
        debug!("paint session: {} shape cells on {}x{}", shape_cells.len(), bounds.width, bounds.height);
        Self {
            shape,
            bounds,
            shape_cells,
            marked: HashSet::new(),
            brush_radius,
            completion_ratio,
            mark,
            is_drawing: false,
            is_completed: false,
            fill_ratio: 0.0,
        }
    }

    pub fn shape(&self) -> &HeartShape {
        &self.shape
    }

    pub fn shape_cells(&self) -> &HashSet<Cell> {
        &self.shape_cells
    }

    pub fn marked_cells(&self) -> &HashSet<Cell> {
        &self.marked
    }

    pub fn fill_ratio(&self) -> f64 {
        self.fill_ratio
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Pointer/touch went down at `p` (surface coordinates).
    pub fn start_drawing(&mut self, p: Point, surface: &mut dyn Surface) -> Option<StrokeOutcome> {
        if self.is_completed {
            return None;
        }
        self.is_drawing = true;
        self.draw(p, surface)
    }

    /// Pointer/touch moved to `p`. Drops the event when not drawing, when
    /// completed, or when `p` itself is outside the heart.
    pub fn draw(&mut self, p: Point, surface: &mut dyn Surface) -> Option<StrokeOutcome> {
        if !self.is_drawing || self.is_completed {
            return None;
        }
        if !self.shape.contains(p) {
            return None;
        }
        Some(self.apply_stroke(p.x, p.y, self.brush_radius, surface))
    }

    pub fn stop_drawing(&mut self) {
        self.is_drawing = false;
    }

    /// Mark every in-shape, in-bounds cell within `radius` of (cx,cy), paint
    /// the new ones, then re-evaluate completion.
    pub fn apply_stroke(&mut self, cx: f64, cy: f64, radius: u32, surface: &mut dyn Surface) -> StrokeOutcome {
        if self.is_completed {
            return StrokeOutcome { fill_ratio: self.fill_ratio, ..Default::default() };
        }

        let r = radius as i32;
        let r2 = (radius as i64) * (radius as i64);
        let mut newly_marked = 0;
        for dx in -r..=r {
            for dy in -r..=r {
                if (dx as i64) * (dx as i64) + (dy as i64) * (dy as i64) > r2 {
                    continue;
                }
                let cell = Cell::new(snap(cx + dx as f64), snap(cy + dy as f64));
                if !self.bounds.contains(cell.x, cell.y) || !self.shape.contains_cell(cell) {
                    continue;
                }
                if self.marked.insert(cell) {
                    self.paint(cell, surface);
                    newly_marked += 1;
                }
            }
        }

        self.update_fill_ratio();
        let completed = self.check_completion();
        trace!("stroke at ({cx:.1},{cy:.1}): +{newly_marked} cells, fill {:.3}", self.fill_ratio);
        StrokeOutcome { newly_marked, fill_ratio: self.fill_ratio, completed }
    }

    /// New surface size: recompute the shape cells from scratch and replay
    /// every marked cell onto the (already cleared and redrawn) surface.
    /// Completion is not re-evaluated here; the next stroke does that.
    pub fn resize(&mut self, shape: HeartShape, bounds: SurfaceSize, surface: &mut dyn Surface) {
        self.shape = shape;
        self.bounds = bounds;
        self.shape_cells = shape.shape_cells(bounds);
        self.update_fill_ratio();
        self.redraw_marked(surface);
        debug!(
            "paint session resized to {}x{}: {} shape cells, fill {:.3}",
            bounds.width,
            bounds.height,
            self.shape_cells.len(),
            self.fill_ratio
        );
    }

    /// Paint every marked cell again.
    pub fn redraw_marked(&self, surface: &mut dyn Surface) {
        for cell in &self.marked {
            self.paint(*cell, surface);
        }
    }

    fn paint(&self, cell: Cell, surface: &mut dyn Surface) {
        let half = (self.mark.size / 2) as i32;
        surface.fill_rect(cell.x - half, cell.y - half, self.mark.size, self.mark.size, self.mark.color);
    }

    fn update_fill_ratio(&mut self) {
        self.fill_ratio = if self.shape_cells.is_empty() {
            0.0
        } else {
            (self.marked.len() as f64 / self.shape_cells.len() as f64).min(1.0)
        };
    }

    fn check_completion(&mut self) -> bool {
        if self.is_completed || self.fill_ratio < self.completion_ratio {
            return false;
        }
        self.is_completed = true;
        self.is_drawing = false;
        info!(
            "heart completed: {} of {} cells ({:.1}%)",
            self.marked.len(),
            self.shape_cells.len(),
            self.fill_ratio * 100.0
        );
        true
    }

    #[cfg(test)]
    fn insert_marks(&mut self, cells: impl IntoIterator<Item = Cell>) {
        self.marked.extend(cells);
        self.update_fill_ratio();
    }
}
