/// Terminal host for the wireship demo
use crossterm::{
    cursor, execute,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetSize, SetTitle},
};
use log::{debug, info, warn};
use std::io::stdout;
use wireship_core::{DemoConfig, FrameClock, MainLoop, Surface};

pub mod error;
pub mod font;
pub mod keys;
pub mod renderer;
pub mod surface;

pub use error::{Result, TerminalError};
pub use font::CellFont;
pub use keys::KeyTracker;
pub use renderer::{AsciiRasterizer, CELL_HEIGHT, CELL_WIDTH};
pub use surface::TerminalSurface;

/// Raw mode, alternate screen and keyboard flags, undone on drop.
///
/// `restore` reports teardown errors; dropping without it (early return or
/// panic) restores on a best-effort basis.
struct TerminalGuard {
    original_size: (u16, u16),
    keyboard_enhanced: bool,
    active: bool,
}

impl TerminalGuard {
    fn enter(config: &DemoConfig) -> Result<Self> {
        let original_size = terminal::size().map_err(TerminalError::Setup)?;
        terminal::enable_raw_mode().map_err(TerminalError::Setup)?;
        let mut guard = Self {
            original_size,
            keyboard_enhanced: false,
            active: true,
        };

        let cols = (config.window.width / CELL_WIDTH) as u16;
        let rows = (config.window.height / CELL_HEIGHT) as u16;
        execute!(
            stdout(),
            EnterAlternateScreen,
            cursor::Hide,
            SetTitle(&config.window.title),
            SetSize(cols, rows)
        )
        .map_err(TerminalError::Setup)?;

        // Release events make held arrow keys exact; not every terminal has them
        guard.keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if guard.keyboard_enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .map_err(TerminalError::Setup)?;
        }
        debug!("keyboard enhancement: {}", guard.keyboard_enhanced);

        Ok(guard)
    }

    fn teardown(&mut self) -> std::io::Result<()> {
        self.active = false;
        if self.keyboard_enhanced {
            execute!(stdout(), PopKeyboardEnhancementFlags)?;
        }
        let (cols, rows) = self.original_size;
        execute!(stdout(), SetSize(cols, rows), LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()
    }

    fn restore(mut self) -> Result<()> {
        self.teardown().map_err(TerminalError::Restore)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            if let Err(err) = self.teardown() {
                warn!("failed to restore terminal: {}", err);
            }
        }
    }
}

/// Main application struct for the terminal demo
pub struct TerminalApp {
    config: DemoConfig,
}

impl TerminalApp {
    pub fn new(config: DemoConfig) -> Self {
        Self { config }
    }

    /// Take over the terminal and run until the user quits
    pub fn run(&self) -> Result<()> {
        let guard = TerminalGuard::enter(&self.config)?;

        let (cols, rows) = terminal::size().map_err(TerminalError::Setup)?;
        if cols == 0 || rows == 0 {
            return Err(TerminalError::TooSmall { cols, rows });
        }

        let keys = KeyTracker::new(guard.keyboard_enhanced);
        let mut surface = TerminalSurface::new(stdout(), cols, rows, keys);
        let (width, height) = surface.size();
        info!("terminal {}x{} cells, surface {}x{} px", cols, rows, width, height);

        let mut demo = MainLoop::new(&self.config, width, height, CellFont);
        let mut clock = FrameClock::new(self.config.target_fps);
        let result = demo.run(&mut surface, &mut clock);
        info!("rendered {} frames", demo.frames());

        let restored = guard.restore();
        result?;
        restored
    }
}
