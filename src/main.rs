use raycaster::prelude::*;
use tracing::{error, info};

fn main() -> Result<(), String> {
    tracing_subscriber::fmt::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = GameConfig::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "failed to load configuration");
        e.to_string()
    })?;

    let mut window = Window::new(
        "Raycaster",
        config.graphics.window_width,
        config.graphics.window_height,
    )?;
    let assets = Assets::load_or_placeholder(&config.assets);
    let mut engine = Engine::new(&config, assets);

    let mut clock = FrameClock::new(config.timing.max_frame_seconds);
    let mut limiter = FrameLimiter::new(&window, config.timing.target_fps);

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) if w > 0 && h > 0 => {
                window.resize(w, h)?;
                engine.resize(w, h);
            }
            WindowEvent::Resize(..) | WindowEvent::None => {}
        }

        if let Some(seconds) = clock.tick(window.timer().ticks64()) {
            engine.tick(&window.controls(), seconds);
            window.present(engine.frame_buffer())?;
        }

        limiter.wait(&window);
    }

    info!("shutting down");
    Ok(())
}
