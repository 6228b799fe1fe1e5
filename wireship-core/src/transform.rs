/// 3D transformation matrices and the push/pop transform stack
use nalgebra::{Matrix4, Vector3};

use crate::animation::AnimationState;
use crate::input::InputState;

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Rotation about the Y axis; the angle is in degrees and is not normalised
    pub fn rotation_y_matrix(degrees: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, degrees.to_radians(), 0.0))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    pub fn uniform_scale_matrix(factor: f32) -> Matrix4<f32> {
        Matrix4::new_scaling(factor)
    }

    /// Reflection across the YZ plane
    pub fn mirror_x_matrix() -> Matrix4<f32> {
        Self::scale_matrix(-1.0, 1.0, 1.0)
    }

    /// Local-to-world matrix of the spaceship.
    ///
    /// Composed as translate, rotate Y, uniform scale, then the optional
    /// mirror, so rotation and scale act around the ship's own centre.
    /// The mirror only commutes with the scale because the scale is uniform.
    pub fn spaceship_model(input: &InputState, animation: &AnimationState) -> Matrix4<f32> {
        let translation = Self::translation_matrix(
            input.manual_tx + animation.translation_offset,
            input.manual_ty,
            0.0,
        );
        let rotation = Self::rotation_y_matrix(animation.rotation_angle);
        let scale = Self::uniform_scale_matrix(animation.scaling_factor);

        let model = translation * rotation * scale;
        if input.mirroring_on {
            model * Self::mirror_x_matrix()
        } else {
            model
        }
    }
}

/// A stack of model-view matrices.
///
/// The top of the stack is the active transform. There is always at least
/// one entry; popping the last one is a no-op.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Matrix4<f32>>,
}

impl MatrixStack {
    pub fn new(base: Matrix4<f32>) -> Self {
        Self { stack: vec![base] }
    }

    /// The active transform
    pub fn top(&self) -> Matrix4<f32> {
        // The constructor seeds one entry and `pop` never removes it
        self.stack.last().copied().unwrap_or_else(Matrix4::identity)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Duplicate the active transform
    pub fn push(&mut self) {
        let top = self.top();
        self.stack.push(top);
    }

    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Replace the active transform
    pub fn load(&mut self, matrix: Matrix4<f32>) {
        if let Some(top) = self.stack.last_mut() {
            *top = matrix;
        }
    }

    pub fn load_identity(&mut self) {
        self.load(Matrix4::identity());
    }

    /// Post-multiply the active transform, so `matrix` applies first to vertices
    pub fn multiply(&mut self, matrix: &Matrix4<f32>) {
        if let Some(top) = self.stack.last_mut() {
            *top *= matrix;
        }
    }

    /// Run `f` inside a pushed scope; the scope is popped before returning
    pub fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.push();
        let result = f(self);
        self.pop();
        result
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new(Matrix4::identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimationConfig;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_rotation_y_quarter_turn() {
        let rotated =
            Transform::rotation_y_matrix(90.0).transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_is_periodic() {
        let a = Transform::rotation_y_matrix(30.0);
        let b = Transform::rotation_y_matrix(390.0);
        assert_relative_eq!(a, b, epsilon = 1e-5);
    }

    #[test]
    fn test_scoped_restores_top() {
        let base = Transform::translation_matrix(0.0, 0.0, -30.0);
        let mut stack = MatrixStack::new(base);

        let inner = stack.scoped(|stack| {
            stack.multiply(&Transform::uniform_scale_matrix(2.0));
            assert_eq!(stack.depth(), 2);
            stack.top()
        });

        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), base);
        assert_eq!(inner, base * Transform::uniform_scale_matrix(2.0));
    }

    #[test]
    fn test_pop_never_empties() {
        let mut stack = MatrixStack::default();
        stack.pop();
        stack.pop();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), Matrix4::identity());
    }

    #[test]
    fn test_spaceship_model_order() {
        let mut input = InputState::default();
        input.manual_tx = 1.0;
        input.manual_ty = -2.0;
        let mut animation = AnimationState::new(AnimationConfig::default());
        animation.rotation_angle = 45.0;
        animation.translation_offset = 0.5;
        animation.scaling_factor = 2.0;

        let expected = Transform::translation_matrix(1.5, -2.0, 0.0)
            * Transform::rotation_y_matrix(45.0)
            * Transform::uniform_scale_matrix(2.0);
        let model = Transform::spaceship_model(&input, &animation);
        assert_relative_eq!(model, expected, epsilon = 1e-6);

        // Rotating after translating would orbit the origin instead
        let orbiting = Transform::rotation_y_matrix(45.0)
            * Transform::translation_matrix(1.5, -2.0, 0.0)
            * Transform::uniform_scale_matrix(2.0);
        assert!((model - orbiting).norm() > 1e-3);

        // Model-space origin lands on the translation
        let centre = model.transform_point(&Point3::origin());
        assert_relative_eq!(centre, Point3::new(1.5, -2.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_mirror_applied_after_scale() {
        let mut input = InputState::default();
        input.mirroring_on = true;
        let mut animation = AnimationState::new(AnimationConfig::default());
        animation.scaling_factor = 3.0;
        animation.rotation_angle = 0.0;
        animation.translation_offset = 0.0;

        let model = Transform::spaceship_model(&input, &animation);
        let expected = Transform::uniform_scale_matrix(3.0) * Transform::mirror_x_matrix();
        assert_relative_eq!(model, expected, epsilon = 1e-6);
        assert_relative_eq!(
            model.transform_point(&Point3::new(1.0, 1.0, 1.0)),
            Point3::new(-3.0, 3.0, 3.0),
            epsilon = 1e-6
        );
    }
}
