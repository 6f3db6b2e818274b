use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use voidfield::{SceneConfig, SceneOverrides};

const DEFAULT_PARTICLES: usize = 30_000;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);

    let particles = match args.next() {
        Some(arg) => match arg.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("usage: voidfield [particle-count] [preset | config.json]");
                return ExitCode::FAILURE;
            }
        },
        None => DEFAULT_PARTICLES,
    };

    let config = match args.next() {
        Some(arg) if arg.ends_with(".json") => SceneConfig::load(&arg),
        Some(arg) => SceneConfig::resolve(&arg, &SceneOverrides::default()),
        None => Ok(SceneConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid scene configuration");
            return ExitCode::FAILURE;
        }
    };

    match voidfield::run(particles, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "voidfield exited with an error");
            ExitCode::FAILURE
        }
    }
}
