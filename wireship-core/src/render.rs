/// Frame composition
///
/// [`RenderPipeline::frame`] draws one complete frame onto a [`Surface`]:
/// starfield, transformed ship, then the text overlay on top.
use nalgebra::{Matrix4, Point3};

use crate::animation::AnimationState;
use crate::config::{ControlsConfig, DemoConfig, OverlayConfig};
use crate::geometry::{Mesh, Segment};
use crate::input::{InputState, Key};
use crate::projection::{Camera, ProjectionMode};
use crate::starfield::Starfield;
use crate::text::{Bitmap, TextRenderer};
use crate::transform::{MatrixStack, Transform};

/// RGB color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

/// The graphics context a frame is drawn into.
///
/// Geometry is given in model space together with the model-view matrix to
/// apply; the surface combines it with the projection set last.
pub trait Surface {
    type Error;

    /// Size in window pixels
    fn size(&self) -> (u32, u32);

    /// Clear color and depth
    fn clear(&mut self, color: Color) -> Result<(), Self::Error>;

    fn set_projection(
        &mut self,
        mode: ProjectionMode,
        matrix: &Matrix4<f32>,
    ) -> Result<(), Self::Error>;

    fn set_depth_test(&mut self, enabled: bool) -> Result<(), Self::Error>;

    fn draw_lines(
        &mut self,
        segments: &[Segment],
        model_view: &Matrix4<f32>,
        color: Color,
    ) -> Result<(), Self::Error>;

    fn draw_points(
        &mut self,
        points: &[Point3<f32>],
        model_view: &Matrix4<f32>,
        size: f32,
        color: Color,
    ) -> Result<(), Self::Error>;

    /// Draw a bitmap with its bottom-left corner at window position (x, y),
    /// y measured upwards from the bottom edge
    fn draw_bitmap(
        &mut self,
        bitmap: &Bitmap,
        x: f32,
        y: f32,
        blend: bool,
    ) -> Result<(), Self::Error>;

    /// Show the finished frame
    fn present(&mut self) -> Result<(), Self::Error>;
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

fn key_label(key: Key) -> String {
    match key {
        Key::Char(c) => c.to_ascii_uppercase().to_string(),
        Key::Left => "Left".to_string(),
        Key::Right => "Right".to_string(),
        Key::Up => "Up".to_string(),
        Key::Down => "Down".to_string(),
    }
}

/// Text shown in the overlay, top line first
pub fn overlay_lines(
    input: &InputState,
    animation: &AnimationState,
    controls: &ControlsConfig,
) -> Vec<String> {
    vec![
        "Controls:".to_string(),
        format!(
            "{} - Rotation (ON/OFF): {}",
            key_label(controls.toggle_rotation),
            on_off(input.rotation_on)
        ),
        format!(
            "{} - Oscillating translation (ON/OFF): {}",
            key_label(controls.toggle_translation),
            on_off(input.translation_on)
        ),
        format!(
            "{} - Oscillating scale (ON/OFF): {}",
            key_label(controls.toggle_scaling),
            on_off(input.scaling_on)
        ),
        format!(
            "{} - Mirroring (ON/OFF): {}",
            key_label(controls.toggle_mirroring),
            on_off(input.mirroring_on)
        ),
        "Arrows - Move the ship".to_string(),
        format!("{} - Quit", key_label(controls.quit)),
        String::new(),
        "Parameters:".to_string(),
        format!("Rotation: {:.2}", animation.rotation_angle),
        format!("Translation: {:.2}", animation.translation_offset),
        format!("Scale: {:.2}", animation.scaling_factor),
        format!("Manual Tx: {:.2}", input.manual_tx),
        format!("Manual Ty: {:.2}", input.manual_ty),
    ]
}

/// Draws starfield, ship and overlay in a fixed order every frame
pub struct RenderPipeline<T: TextRenderer> {
    camera: Camera,
    stack: MatrixStack,
    starfield: Starfield,
    wireframe: Vec<Segment>,
    nose_lines: Vec<Segment>,
    text: T,
    controls: ControlsConfig,
    overlay: OverlayConfig,
    clear_color: Color,
    ship_color: Color,
}

impl<T: TextRenderer> RenderPipeline<T> {
    pub fn new(
        config: &DemoConfig,
        camera: Camera,
        starfield: Starfield,
        mesh: &Mesh,
        text: T,
    ) -> Self {
        let stack = MatrixStack::new(camera.view_matrix());
        Self {
            camera,
            stack,
            starfield,
            wireframe: mesh.edges().collect(),
            nose_lines: mesh.spaceship_lines().collect(),
            text,
            controls: config.controls.clone(),
            overlay: config.overlay.clone(),
            clear_color: config.window.clear_color,
            ship_color: config.ship_color,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// One-time surface setup: perspective projection with depth testing
    pub fn prepare<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.set_projection(ProjectionMode::Perspective, &self.camera.perspective_matrix())?;
        surface.set_depth_test(true)
    }

    pub fn frame<S: Surface>(
        &mut self,
        surface: &mut S,
        input: &InputState,
        animation: &AnimationState,
    ) -> Result<(), S::Error> {
        surface.clear(self.clear_color)?;

        // Stars only ever see the camera placement
        let view = self.camera.view_matrix();
        let starfield = &self.starfield;
        self.stack.scoped(|stack| -> Result<(), S::Error> {
            stack.load(view);
            starfield.render(surface, stack)
        })?;

        let model = Transform::spaceship_model(input, animation);
        let (wireframe, nose_lines) = (&self.wireframe, &self.nose_lines);
        let ship_color = self.ship_color;
        self.stack.scoped(|stack| -> Result<(), S::Error> {
            stack.multiply(&model);
            surface.draw_lines(wireframe, &stack.top(), ship_color)?;
            surface.draw_lines(nose_lines, &stack.top(), ship_color)
        })?;

        self.draw_overlay(surface, input, animation)?;

        surface.present()
    }

    fn draw_overlay<S: Surface>(
        &mut self,
        surface: &mut S,
        input: &InputState,
        animation: &AnimationState,
    ) -> Result<(), S::Error> {
        surface.set_projection(ProjectionMode::Orthographic, &self.camera.overlay_matrix())?;

        let lines = overlay_lines(input, animation, &self.controls);
        let (text, overlay) = (&self.text, &self.overlay);
        let top = self.camera.height as f32 - overlay.top;
        self.stack.scoped(|stack| -> Result<(), S::Error> {
            stack.load_identity();
            surface.set_depth_test(false)?;

            for (row, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let bitmap = text.render_text(line, &overlay.font, overlay.color);
                let y = top - row as f32 * overlay.line_spacing;
                surface.draw_bitmap(&bitmap, overlay.left, y, true)?;
            }
            Ok(())
        })?;

        surface.set_projection(ProjectionMode::Perspective, &self.camera.perspective_matrix())?;
        surface.set_depth_test(true)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{DrawCall, PlainText, RecordingSurface, SurfaceFault};
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pipeline() -> RenderPipeline<PlainText> {
        let config = DemoConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let starfield = Starfield::generate_with(&mut rng, 300, 50.0, 50.0, 50.0);
        let camera = Camera::new(1000, 800);
        RenderPipeline::new(&config, camera, starfield, &Mesh::spaceship(), PlainText)
    }

    #[test]
    fn test_frame_call_order() {
        let mut pipeline = pipeline();
        let mut surface = RecordingSurface::new(1000, 800);
        let input = InputState::new();
        let animation = AnimationState::default();

        pipeline.frame(&mut surface, &input, &animation).unwrap();

        let calls = &surface.calls;
        assert_eq!(calls[0], DrawCall::Clear(Color::BLACK));
        assert!(matches!(calls[1], DrawCall::Points { count: 300, .. }));
        match (&calls[2], &calls[3]) {
            (DrawCall::Lines { segments: base, .. }, DrawCall::Lines { segments: nose, .. }) => {
                assert_eq!(base.len(), 12);
                assert_eq!(nose.len(), 4);
            }
            other => panic!("expected wireframe then nose, got {:?}", other),
        }
        assert_eq!(calls[4], DrawCall::Projection(ProjectionMode::Orthographic));
        assert_eq!(calls[5], DrawCall::DepthTest(false));

        let bitmaps = calls.iter().filter(|c| matches!(c, DrawCall::Bitmap { .. })).count();
        assert_eq!(bitmaps, 13);

        let n = calls.len();
        assert_eq!(calls[n - 3], DrawCall::Projection(ProjectionMode::Perspective));
        assert_eq!(calls[n - 2], DrawCall::DepthTest(true));
        assert_eq!(calls[n - 1], DrawCall::Present);
    }

    #[test]
    fn test_stars_ignore_ship_transform() {
        let mut pipeline = pipeline();
        let mut surface = RecordingSurface::new(1000, 800);
        let mut input = InputState::new();
        input.manual_tx = 4.0;
        input.mirroring_on = true;
        let mut animation = AnimationState::default();
        animation.rotation_angle = 33.0;

        pipeline.frame(&mut surface, &input, &animation).unwrap();

        let view = Camera::new(1000, 800).view_matrix();
        match &surface.calls[1] {
            DrawCall::Points { model_view, .. } => assert_eq!(*model_view, view),
            other => panic!("expected stars, got {:?}", other),
        }
        match &surface.calls[2] {
            DrawCall::Lines { model_view, .. } => {
                let expected = view * Transform::spaceship_model(&input, &animation);
                assert_relative_eq!(*model_view, expected, epsilon = 1e-5);
            }
            other => panic!("expected ship, got {:?}", other),
        }
    }

    #[test]
    fn test_stack_balanced_after_frame() {
        let mut pipeline = pipeline();
        let mut surface = RecordingSurface::new(1000, 800);
        pipeline
            .frame(&mut surface, &InputState::new(), &AnimationState::default())
            .unwrap();
        assert_eq!(pipeline.stack.depth(), 1);
        assert_eq!(pipeline.stack.top(), pipeline.camera().view_matrix());
    }

    #[test]
    fn test_failed_draw_aborts_frame() {
        let mut pipeline = pipeline();
        let mut surface = RecordingSurface::new(1000, 800);
        surface.fail_bitmap_at = Some(4);

        let result = pipeline.frame(&mut surface, &InputState::new(), &AnimationState::default());

        assert_eq!(result, Err(SurfaceFault));
        assert_eq!(surface.presents(), 0);
        assert!(!surface.calls.contains(&DrawCall::DepthTest(true)));
        // The overlay scope is still popped on the way out
        assert_eq!(pipeline.stack.depth(), 1);
        assert_eq!(pipeline.stack.top(), pipeline.camera().view_matrix());
    }

    #[test]
    fn test_overlay_layout() {
        let mut pipeline = pipeline();
        let mut surface = RecordingSurface::new(1000, 800);
        pipeline
            .frame(&mut surface, &InputState::new(), &AnimationState::default())
            .unwrap();

        let bitmaps: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Bitmap { text, x, y, blend } => Some((text.clone(), *x, *y, *blend)),
                _ => None,
            })
            .collect();

        assert_eq!(bitmaps[0], ("Controls:".to_string(), 10.0, 780.0, true));
        assert_eq!(bitmaps[1].0, "R - Rotation (ON/OFF): ON");
        assert_eq!(bitmaps[1].2, 760.0);
        // The blank line after "Q - Quit" still takes up a row
        assert_eq!(bitmaps[6].0, "Q - Quit");
        assert_eq!(bitmaps[7].0, "Parameters:");
        assert_eq!(bitmaps[7].2, 780.0 - 8.0 * 20.0);
        assert!(bitmaps.iter().all(|b| b.3));
    }

    #[test]
    fn test_overlay_lines_report_state() {
        let mut input = InputState::new();
        input.mirroring_on = true;
        input.scaling_on = false;
        input.manual_tx = -1.234;
        let mut animation = AnimationState::default();
        animation.rotation_angle = 45.0;

        let lines = overlay_lines(&input, &animation, &ControlsConfig::default());
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[3], "S - Oscillating scale (ON/OFF): OFF");
        assert_eq!(lines[4], "E - Mirroring (ON/OFF): ON");
        assert_eq!(lines[9], "Rotation: 45.00");
        assert_eq!(lines[11], "Scale: 2.00");
        assert_eq!(lines[12], "Manual Tx: -1.23");
    }

    #[test]
    fn test_prepare_sets_perspective() {
        let pipeline = pipeline();
        let mut surface = RecordingSurface::new(1000, 800);
        pipeline.prepare(&mut surface).unwrap();
        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Projection(ProjectionMode::Perspective),
                DrawCall::DepthTest(true)
            ]
        );
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(Color::WHITE.to_rgb8(), (255, 255, 255));
        assert_eq!(Color::rgb(2.0, -1.0, 0.5).to_rgb8(), (255, 0, 128));
    }
}
