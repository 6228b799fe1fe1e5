/// Main loop
///
/// Each iteration drains discrete input, samples held keys, advances the
/// animation and renders one frame. The loop owns every piece of mutable
/// state; nothing lives in globals.
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::animation::AnimationState;
use crate::config::{ControlsConfig, DemoConfig};
use crate::geometry::Mesh;
use crate::input::{InputEvent, InputState, Key, LoopSignal};
use crate::projection::Camera;
use crate::render::{RenderPipeline, Surface};
use crate::starfield::Starfield;
use crate::text::TextRenderer;

/// A surface that also delivers keyboard input
pub trait Window: Surface {
    /// Drain pending events without blocking
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, Self::Error>;

    fn is_key_held(&self, key: Key) -> bool;
}

/// Source of per-frame time deltas
pub trait FrameTimer {
    /// Seconds since the previous tick
    fn tick(&mut self) -> f32;
}

/// Wall-clock timer capped at a target rate.
///
/// `tick` sleeps away whatever is left of the current frame period.
pub struct FrameClock {
    frame_time: Duration,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs(1) / target_fps.max(1),
            last_tick: Instant::now(),
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }
}

impl FrameTimer for FrameClock {
    fn tick(&mut self) -> f32 {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.frame_time {
            std::thread::sleep(self.frame_time - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        dt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal; the iteration that stops still finishes, later ones do nothing
    Stopped,
}

pub struct MainLoop<T: TextRenderer> {
    controls: ControlsConfig,
    input: InputState,
    animation: AnimationState,
    pipeline: RenderPipeline<T>,
    state: LoopState,
    frames: u64,
}

impl<T: TextRenderer> MainLoop<T> {
    /// Build the demo for a surface of `width` x `height` pixels
    pub fn new(config: &DemoConfig, width: u32, height: u32, text: T) -> Self {
        let starfield = Starfield::from_config(&config.starfield);
        info!(
            "generated {} stars, surface {}x{}",
            starfield.len(),
            width,
            height
        );
        let pipeline = RenderPipeline::new(
            config,
            Camera::new(width, height),
            starfield,
            &Mesh::spaceship(),
            text,
        );
        Self::with_pipeline(config, pipeline)
    }

    pub fn with_pipeline(config: &DemoConfig, pipeline: RenderPipeline<T>) -> Self {
        Self {
            controls: config.controls.clone(),
            input: InputState::new(),
            animation: AnimationState::new(config.animation),
            pipeline,
            state: LoopState::Running,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Run one iteration with the given time delta
    pub fn step<W: Window>(&mut self, window: &mut W, dt: f32) -> Result<LoopState, W::Error> {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }

        // The whole batch applies even when a quit arrives part way through
        for event in window.poll_events()? {
            if self.input.apply_discrete_event(event, &self.controls) == LoopSignal::Quit
                && self.state == LoopState::Running
            {
                info!("quit received after {} frames", self.frames);
                self.state = LoopState::Stopped;
            }
        }

        self.input
            .apply_continuous_input(&self.controls, |key| window.is_key_held(key), dt);
        self.animation.advance(dt, &self.input);
        self.pipeline.frame(window, &self.input, &self.animation)?;
        self.frames += 1;

        Ok(self.state)
    }

    /// Loop until stopped; surface errors end the loop and are returned
    pub fn run<W: Window>(
        &mut self,
        window: &mut W,
        timer: &mut impl FrameTimer,
    ) -> Result<(), W::Error> {
        self.pipeline.prepare(window)?;
        debug!("entering main loop");

        while self.step(window, timer.tick())? == LoopState::Running {}

        info!("main loop stopped");
        Ok(())
    }
}
