use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use macroquad::window::Conf;

use super_snake::GameConfig;
use super_snake::app::{self, Session};

#[derive(Debug, Parser)]
#[command(author, version, about = "Grid snake with a start screen and restart")]
struct Args {
    /// JSON file with game settings; flags below override it.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Grid width in cells.
    #[arg(long)]
    width: Option<u32>,
    /// Grid height in cells.
    #[arg(long)]
    height: Option<u32>,
    /// Cell edge length in pixels.
    #[arg(long)]
    cell_size: Option<u32>,
    /// Moves per second.
    #[arg(long)]
    tick_rate: Option<u32>,
    /// Seed for food placement and shake; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Eat sound file (WAV or OGG).
    #[arg(long, value_name = "FILE")]
    sound: Option<PathBuf>,
    /// Play without sound.
    #[arg(long)]
    mute: bool,
}

impl Args {
    fn into_config(self) -> Result<(GameConfig, Option<u64>, bool)> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate = tick_rate;
        }
        if self.sound.is_some() {
            config.eat_sound = self.sound;
        }
        config.validate()?;
        Ok((config, self.seed, self.mute))
    }
}

fn window_conf(config: &GameConfig) -> Conf {
    let (width, height) = config.window_size();
    Conf {
        window_title: config.window_title.clone(),
        window_width: width as i32,
        window_height: height as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, seed, mute) = Args::parse().into_config()?;
    let seed = seed.unwrap_or_else(rand::random);
    info!(
        "{}: {}x{} grid, {} moves/s, seed {seed}",
        config.window_title, config.grid_width, config.grid_height, config.tick_rate
    );

    macroquad::Window::from_config(window_conf(&config), app::run(Session { config, seed, mute }));
    Ok(())
}
