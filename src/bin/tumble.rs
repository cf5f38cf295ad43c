use clap::Parser;
use log::{LevelFilter, error, info};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tumble::config::PlaygroundConfig;
use tumble::winit::window::Window;
use tumble::{AppRuntime, AppState, World};

/// Drop spheres and cubes onto a floor and listen to them land.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML file overriding the default playground settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

struct Playground {
    initial_cube: bool,
}

impl AppState for Playground {
    fn init(&mut self, world: &mut World, _window: &Window) -> Result<(), Box<dyn Error>> {
        if self.initial_cube {
            world.spawn_initial_cube();
        }

        world.debug_panel.print_help();
        world.scene.print_objects();

        Ok(())
    }

    fn destroy(&mut self, world: &mut World, _window: &Window) -> Result<(), Box<dyn Error>> {
        info!(
            "Closing after {} frames with {} shapes",
            world.frame_counter.total_frames(),
            world.tracked.len()
        );
        Ok(())
    }
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => match PlaygroundConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => PlaygroundConfig::default(),
    };

    let playground = Playground {
        initial_cube: config.spawn.initial_cube,
    };

    if let Err(e) = playground.configure(config).run() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
