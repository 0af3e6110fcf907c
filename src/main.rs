use std::fs::File;
use std::process::ExitCode;
use std::sync::Mutex;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use simple_shooter::config::LoggingConfig;
use simple_shooter::platform::TerminalPlatform;
use simple_shooter::{Config, Game, StartupError};

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file: the terminal itself is the game screen.
fn init_logging(config: &LoggingConfig) -> Result<(), StartupError> {
    let file = File::create(&config.file).map_err(|source| StartupError::Logging {
        path: config.file.clone(),
        source,
    })?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Error reporting ───────────────────────────────────────────────────────────

/// Debug builds just log; release builds frame the message like a dialog box.
fn report(err: &StartupError) {
    error!(%err, "fatal startup error");
    let message = err.to_string();
    if cfg!(debug_assertions) {
        eprintln!("{message}");
        return;
    }

    eprint!("{}", error_box(&message));
}

/// Frame `message` in a box titled "Run-Time Error", one row per line.
fn error_box(message: &str) -> String {
    let title = " Run-Time Error ";
    let title_len = title.chars().count();
    let lines: Vec<&str> = message.lines().collect();
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let inner = widest.max(title_len) + 2;

    let mut out = format!("┌{title}{}┐\n", "─".repeat(inner - title_len));
    for line in &lines {
        out.push_str(&format!("│ {line:<width$} │\n", width = inner - 2));
    }
    out.push_str(&format!("└{}┘\n", "─".repeat(inner)));
    out
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn startup_and_run() -> Result<(), StartupError> {
    let config = Config::load(&Config::path_from_env())?;
    init_logging(&config.logging)?;
    info!(?config, "starting");

    let platform = TerminalPlatform::startup(&config.window)?;
    let game = Game::startup(
        platform,
        &config.assets.player_sprite,
        config.controls.bindings(),
    );

    let (platform, _) = game.run();
    platform.shutdown();
    info!("shutdown complete");
    Ok(())
}

fn main() -> ExitCode {
    match startup_and_run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
