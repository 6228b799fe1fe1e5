/// Wireship Core Library - Spaceship demo state, transforms and frame pipeline
///
/// This library holds everything that does not depend on a concrete display:
/// the wireframe mesh, the starfield, input and animation state, the
/// transform stack, camera projections and the per-frame render pipeline.
/// Backends implement [`Window`] and [`TextRenderer`] to host it.
pub mod animation;
pub mod config;
pub mod geometry;
pub mod input;
pub mod main_loop;
pub mod projection;
pub mod render;
pub mod starfield;
pub mod text;
pub mod transform;

// Re-export commonly used types
pub use animation::AnimationState;
pub use config::DemoConfig;
pub use geometry::{Edge, Mesh, Segment, Vertex};
pub use input::{InputEvent, InputState, Key, LoopSignal};
pub use main_loop::{FrameClock, FrameTimer, LoopState, MainLoop, Window};
pub use projection::{Camera, ProjectionMode};
pub use render::{Color, RenderPipeline, Surface};
pub use starfield::Starfield;
pub use text::{Bitmap, FontSpec, Texel, TextRenderer};
pub use transform::{MatrixStack, Transform};
