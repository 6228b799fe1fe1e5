/// Terminal-backed window: rasterizer output plus keyboard input
use crossterm::{cursor, event, QueueableCommand};
use log::warn;
use nalgebra::{Matrix4, Point3};
use std::io::Write;
use std::time::{Duration, Instant};
use wireship_core::{Bitmap, Color, InputEvent, Key, ProjectionMode, Segment, Surface, Window};

use crate::error::TerminalError;
use crate::keys::KeyTracker;
use crate::renderer::{AsciiRasterizer, CELL_HEIGHT, CELL_WIDTH};

/// A terminal grid of `cols` x `rows` cells, addressed in window pixels
pub struct TerminalSurface<W: Write> {
    out: W,
    raster: AsciiRasterizer,
    keys: KeyTracker,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16, keys: KeyTracker) -> Self {
        Self {
            out,
            raster: AsciiRasterizer::new(cols as usize, rows as usize),
            keys,
        }
    }

    pub fn raster(&self) -> &AsciiRasterizer {
        &self.raster
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    type Error = TerminalError;

    fn size(&self) -> (u32, u32) {
        let (cols, rows) = self.raster.size();
        (cols as u32 * CELL_WIDTH, rows as u32 * CELL_HEIGHT)
    }

    fn clear(&mut self, color: Color) -> Result<(), TerminalError> {
        self.raster.clear(color);
        Ok(())
    }

    fn set_projection(
        &mut self,
        _mode: ProjectionMode,
        matrix: &Matrix4<f32>,
    ) -> Result<(), TerminalError> {
        self.raster.set_projection(*matrix);
        Ok(())
    }

    fn set_depth_test(&mut self, enabled: bool) -> Result<(), TerminalError> {
        self.raster.set_depth_test(enabled);
        Ok(())
    }

    fn draw_lines(
        &mut self,
        segments: &[Segment],
        model_view: &Matrix4<f32>,
        color: Color,
    ) -> Result<(), TerminalError> {
        self.raster.draw_lines(segments, model_view, color);
        Ok(())
    }

    fn draw_points(
        &mut self,
        points: &[Point3<f32>],
        model_view: &Matrix4<f32>,
        _size: f32,
        color: Color,
    ) -> Result<(), TerminalError> {
        // Any point smaller than a cell fills exactly one cell
        self.raster.draw_points(points, model_view, color);
        Ok(())
    }

    fn draw_bitmap(
        &mut self,
        bitmap: &Bitmap,
        x: f32,
        y: f32,
        blend: bool,
    ) -> Result<(), TerminalError> {
        self.raster.blit(bitmap, x, y, blend);
        Ok(())
    }

    fn present(&mut self) -> Result<(), TerminalError> {
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.raster.draw(&mut self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Window for TerminalSurface<W> {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, TerminalError> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            let terminal_event = event::read()?;
            if let event::Event::Resize(cols, rows) = terminal_event {
                warn!("terminal resized to {}x{}; the frame keeps its startup size", cols, rows);
            }
            if let Some(input) = self.keys.handle(&terminal_event, Instant::now()) {
                events.push(input);
            }
        }
        Ok(events)
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.keys.is_held(key, Instant::now())
    }
}
