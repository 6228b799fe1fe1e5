/// Wireship Terminal Demo - Interactive wireframe spaceship
///
/// Controls:
///   - R / T / S / E: Toggle rotation, translation, scaling, mirroring
///   - Arrow Keys: Move the ship
///   - Q / ESC: Quit
///
/// Logs go to stderr; redirect it to read them, e.g. `RUST_LOG=debug wireship 2> wireship.log`.
use log::{error, info};
use wireship_core::DemoConfig;
use wireship_terminal::{TerminalApp, TerminalError};

fn main() -> Result<(), TerminalError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = DemoConfig::default();
    info!(
        "starting \"{}\" at {}x{}, {} fps",
        config.window.title, config.window.width, config.window.height, config.target_fps
    );

    let app = TerminalApp::new(config);
    if let Err(err) = app.run() {
        error!("{}", err);
        return Err(err);
    }

    info!("shutdown complete");
    Ok(())
}
