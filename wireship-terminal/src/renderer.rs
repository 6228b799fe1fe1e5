/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3, Vector4};
use std::io::Write;
use wireship_core::{Bitmap, Color, Segment};

/// Window pixels covered by one terminal cell horizontally
pub const CELL_WIDTH: u32 = 10;
/// Window pixels covered by one terminal cell vertically
pub const CELL_HEIGHT: u32 = 20;

/// Texels with less alpha than this are skipped when blending
const ALPHA_CUTOFF: u8 = 128;

/// Glyph used for stars and other points
const POINT_GLYPH: char = '.';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: Color::WHITE,
};

/// A projected vertex: cell coordinates plus NDC depth
#[derive(Debug, Clone, Copy)]
struct ScreenPoint {
    x: f32,
    y: f32,
    depth: f32,
}

/// Rasterizes points, line segments and bitmaps into a grid of terminal cells
pub struct AsciiRasterizer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    depth_buffer: Vec<f32>,
    background: Color,
    projection: Matrix4<f32>,
    depth_test: bool,
}

impl AsciiRasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            cells: vec![BLANK; size],
            depth_buffer: vec![f32::INFINITY; size],
            background: Color::BLACK,
            projection: Matrix4::identity(),
            depth_test: true,
        }
    }

    /// Size in cells
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn clear(&mut self, background: Color) {
        self.background = background;
        self.cells.fill(BLANK);
        self.depth_buffer.fill(f32::INFINITY);
    }

    pub fn set_projection(&mut self, projection: Matrix4<f32>) {
        self.projection = projection;
    }

    pub fn set_depth_test(&mut self, enabled: bool) {
        self.depth_test = enabled;
    }

    /// Glyph and color at a cell, `None` outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Option<(char, Color)> {
        if x < self.width && y < self.height {
            let cell = self.cells[y * self.width + x];
            Some((cell.glyph, cell.color))
        } else {
            None
        }
    }

    fn clip_space(&self, model_view: &Matrix4<f32>, point: &Point3<f32>) -> Vector4<f32> {
        self.projection * model_view * point.to_homogeneous()
    }

    /// Perspective divide and viewport mapping; row 0 is the top of the screen
    fn to_screen(&self, clip: &Vector4<f32>) -> ScreenPoint {
        let ndc = clip.xyz() / clip.w;
        ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * self.width as f32,
            y: (1.0 - ndc.y) * 0.5 * self.height as f32,
            depth: ndc.z,
        }
    }

    pub fn draw_points(&mut self, points: &[Point3<f32>], model_view: &Matrix4<f32>, color: Color) {
        for point in points {
            let clip = self.clip_space(model_view, point);
            if clip.z + clip.w < 0.0 || clip.w <= 0.0 {
                continue; // Behind the near plane
            }
            let screen = self.to_screen(&clip);
            if screen.x < 0.0 || screen.y < 0.0 {
                continue;
            }
            self.plot(screen.x as usize, screen.y as usize, screen.depth, POINT_GLYPH, color);
        }
    }

    pub fn draw_lines(&mut self, segments: &[Segment], model_view: &Matrix4<f32>, color: Color) {
        for (a, b) in segments {
            let a = self.clip_space(model_view, a);
            let b = self.clip_space(model_view, b);
            if let Some((a, b)) = clip_near(a, b) {
                let (a, b) = (self.to_screen(&a), self.to_screen(&b));
                self.rasterize_line(a, b, color);
            }
        }
    }

    fn rasterize_line(&mut self, a: ScreenPoint, b: ScreenPoint, color: Color) {
        let glyph = line_glyph(b.x - a.x, b.y - a.y);

        // Liang-Barsky against the grid rectangle
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let max_x = self.width as f32;
        let max_y = self.height as f32;
        let mut t0 = 0.0f32;
        let mut t1 = 1.0f32;
        for (p, q) in [(-dx, a.x), (dx, max_x - a.x), (-dy, a.y), (dy, max_y - a.y)] {
            if p == 0.0 {
                if q < 0.0 {
                    return;
                }
            } else {
                let t = q / p;
                if p < 0.0 {
                    t0 = t0.max(t);
                } else {
                    t1 = t1.min(t);
                }
            }
        }
        if t0 > t1 {
            return;
        }

        let lerp = |t: f32| ScreenPoint {
            x: a.x + dx * t,
            y: a.y + dy * t,
            depth: a.depth + (b.depth - a.depth) * t,
        };
        let (start, end) = (lerp(t0), lerp(t1));

        // DDA walk, one plot per cell along the major axis
        let steps = (end.x - start.x).abs().max((end.y - start.y).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = start.x + (end.x - start.x) * t;
            let y = start.y + (end.y - start.y) * t;
            let depth = start.depth + (end.depth - start.depth) * t;
            if x >= 0.0 && y >= 0.0 {
                self.plot(x as usize, y as usize, depth, glyph, color);
            }
        }
    }

    fn plot(&mut self, x: usize, y: usize, depth: f32, glyph: char, color: Color) {
        if x >= self.width || y >= self.height || !(-1.0..=1.0).contains(&depth) {
            return;
        }
        let idx = y * self.width + x;
        if self.depth_test {
            if depth >= self.depth_buffer[idx] {
                return;
            }
            self.depth_buffer[idx] = depth;
        }
        self.cells[idx] = Cell { glyph, color };
    }

    /// Copy a bitmap with its bottom-left corner at window pixel (x, y),
    /// y counted upwards from the bottom edge. Depth is ignored.
    pub fn blit(&mut self, bitmap: &Bitmap, x: f32, y: f32, blend: bool) {
        if bitmap.is_empty() {
            return;
        }
        let left = (x / CELL_WIDTH as f32).floor() as i64;
        let bottom = self.height as i64 - 1 - (y / CELL_HEIGHT as f32).floor() as i64;
        let top = bottom - (bitmap.height as i64 - 1);

        for row in 0..bitmap.height {
            for col in 0..bitmap.width {
                let (cx, cy) = (left + col as i64, top + row as i64);
                if cx < 0 || cy < 0 || cx >= self.width as i64 || cy >= self.height as i64 {
                    continue;
                }
                let Some(texel) = bitmap.get(col, row) else {
                    continue;
                };
                let glyph = if texel.alpha >= ALPHA_CUTOFF {
                    texel.glyph
                } else if blend {
                    continue;
                } else {
                    ' '
                };
                let idx = cy as usize * self.width + cx as usize;
                self.cells[idx] = Cell {
                    glyph,
                    color: bitmap.color,
                };
            }
        }
    }

    /// Write the whole grid, switching colors only where they change
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(term_color(self.background)))?;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            let row = &self.cells[y * self.width..(y + 1) * self.width];

            let mut run = String::with_capacity(self.width);
            let mut run_color: Option<Color> = None;
            for cell in row {
                // Blank cells take whatever color the current run has
                if cell.glyph != ' ' && run_color != Some(cell.color) {
                    if !run.is_empty() {
                        writer.queue(Print(&run))?;
                        run.clear();
                    }
                    writer.queue(SetForegroundColor(term_color(cell.color)))?;
                    run_color = Some(cell.color);
                }
                run.push(cell.glyph);
            }
            writer.queue(Print(&run))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb8();
    TermColor::Rgb { r, g, b }
}

/// Cut a clip-space segment to the part in front of the near plane (z >= -w)
fn clip_near(a: Vector4<f32>, b: Vector4<f32>) -> Option<(Vector4<f32>, Vector4<f32>)> {
    let da = a.z + a.w;
    let db = b.z + b.w;
    match (da >= 0.0, db >= 0.0) {
        (true, true) => Some((a, b)),
        (false, false) => None,
        (true, false) => Some((a, a + (b - a) * (da / (da - db)))),
        (false, true) => Some((b + (a - b) * (db / (db - da)), b)),
    }
}

/// Pick a glyph matching the on-screen slope of a segment given in cells
fn line_glyph(dx: f32, dy: f32) -> char {
    // Cells are twice as tall as they are wide
    let px = dx * CELL_WIDTH as f32;
    let py = -dy * CELL_HEIGHT as f32;
    let mut angle = py.atan2(px).to_degrees();
    if angle < 0.0 {
        angle += 180.0;
    }
    match angle {
        a if !(22.5..157.5).contains(&a) => '-',
        a if a < 67.5 => '/',
        a if a < 112.5 => '|',
        _ => '\\',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wireship_core::{Camera, Texel};

    fn ortho_raster(width: usize, height: usize) -> AsciiRasterizer {
        let mut raster = AsciiRasterizer::new(width, height);
        let (width, height) = (width as f32, height as f32);
        raster.set_projection(Matrix4::new_orthographic(0.0, width, 0.0, height, -1.0, 1.0));
        raster
    }

    #[test]
    fn test_line_glyphs() {
        assert_eq!(line_glyph(10.0, 0.0), '-');
        assert_eq!(line_glyph(0.0, 5.0), '|');
        assert_eq!(line_glyph(2.0, -1.0), '/');
        assert_eq!(line_glyph(-2.0, -1.0), '\\');
    }

    #[test]
    fn test_horizontal_line() {
        let mut raster = ortho_raster(20, 10);
        let segment = (Point3::new(2.5, 5.5, 0.0), Point3::new(12.5, 5.5, 0.0));
        raster.draw_lines(&[segment], &Matrix4::identity(), Color::WHITE);

        // y = 5.5 up from the bottom is row 4 from the top
        for x in 2..=12 {
            assert_eq!(raster.cell(x, 4), Some(('-', Color::WHITE)));
        }
        assert_eq!(raster.cell(1, 4).map(|c| c.0), Some(' '));
        assert_eq!(raster.cell(13, 4).map(|c| c.0), Some(' '));
    }

    #[test]
    fn test_offscreen_line_is_clipped() {
        let mut raster = ortho_raster(10, 10);
        let segment = (Point3::new(-50.0, 2.5, 0.0), Point3::new(50.0, 2.5, 0.0));
        raster.draw_lines(&[segment], &Matrix4::identity(), Color::WHITE);
        for x in 0..10 {
            assert_eq!(raster.cell(x, 7).map(|c| c.0), Some('-'));
        }
    }

    #[test]
    fn test_depth_keeps_nearest() {
        let mut raster = ortho_raster(10, 10);
        let red = Color::rgb(1.0, 0.0, 0.0);
        // Orthographic with near -1, far 1: larger z is closer to the viewer
        raster.draw_points(&[Point3::new(5.5, 5.5, 0.5)], &Matrix4::identity(), red);
        raster.draw_points(&[Point3::new(5.5, 5.5, -0.5)], &Matrix4::identity(), Color::WHITE);
        assert_eq!(raster.cell(5, 4), Some(('.', red)));

        raster.set_depth_test(false);
        raster.draw_points(&[Point3::new(5.5, 5.5, -0.5)], &Matrix4::identity(), Color::WHITE);
        assert_eq!(raster.cell(5, 4), Some(('.', Color::WHITE)));
    }

    #[test]
    fn test_segment_behind_camera_skipped() {
        let camera = Camera::new(200, 200);
        let mut raster = AsciiRasterizer::new(20, 10);
        raster.set_projection(camera.perspective_matrix());
        let view = camera.view_matrix();

        // z = +40 in world space is 10 units behind the camera
        let behind = (Point3::new(-1.0, 0.0, 40.0), Point3::new(1.0, 0.0, 40.0));
        raster.draw_lines(&[behind], &view, Color::WHITE);
        assert!(raster.cells.iter().all(|c| c.glyph == ' '));

        let visible = (Point3::new(-5.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0));
        raster.draw_lines(&[visible], &view, Color::WHITE);
        assert!(raster.cells.iter().any(|c| c.glyph == '-'));
    }

    #[test]
    fn test_line_crossing_near_plane_is_cut() {
        let camera = Camera::new(200, 200);
        let mut raster = AsciiRasterizer::new(20, 10);
        raster.set_projection(camera.perspective_matrix());
        let crossing = (Point3::new(0.5, 0.5, 0.0), Point3::new(0.5, 0.5, 60.0));
        raster.draw_lines(&[crossing], &camera.view_matrix(), Color::WHITE);
        assert!(raster.cells.iter().any(|c| c.glyph != ' '));
    }

    #[test]
    fn test_blit_blends_over_cells() {
        let mut raster = ortho_raster(10, 4);
        raster.draw_lines(
            &[(Point3::new(0.0, 3.5, 0.0), Point3::new(9.9, 3.5, 0.0))],
            &Matrix4::identity(),
            Color::WHITE,
        );

        let mut bitmap = Bitmap::new(3, 1, Color::rgb(0.0, 1.0, 0.0));
        bitmap.set(0, 0, Texel::opaque('a'));
        bitmap.set(2, 0, Texel::opaque('c'));
        // Window y 60..80 is the top row of a 4-row grid
        raster.blit(&bitmap, 10.0, 60.0, true);

        assert_eq!(raster.cell(1, 0).map(|c| c.0), Some('a'));
        assert_eq!(raster.cell(2, 0).map(|c| c.0), Some('-'));
        assert_eq!(raster.cell(3, 0).map(|c| c.0), Some('c'));

        raster.blit(&bitmap, 10.0, 60.0, false);
        assert_eq!(raster.cell(2, 0).map(|c| c.0), Some(' '));
    }

    #[test]
    fn test_blit_outside_grid_ignored() {
        let mut raster = ortho_raster(4, 2);
        let mut bitmap = Bitmap::new(2, 1, Color::WHITE);
        bitmap.set(0, 0, Texel::opaque('x'));
        raster.blit(&bitmap, 0.0, 500.0, true);
        raster.blit(&bitmap, -100.0, 0.0, true);
        assert!(raster.cells.iter().all(|c| c.glyph == ' '));
    }

    #[test]
    fn test_draw_writes_every_row() {
        let mut raster = ortho_raster(4, 2);
        raster.draw_points(&[Point3::new(1.5, 1.5, 0.0)], &Matrix4::identity(), Color::WHITE);
        let mut out = Vec::new();
        raster.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(".  "));
        assert!(text.contains("    "));
    }
}
