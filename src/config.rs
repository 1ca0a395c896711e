//! Session configuration.
//!
//! Everything that used to be a loose constant (grid size, speed, colors,
//! shake tuning) lives in [`GameConfig`], which is built once at startup and
//! handed by reference to the game and the renderer.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use macroquad::color::Color;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Jitter amplitude as a fraction of `shake_intensity`.
pub const SHAKE_AMPLITUDE_SCALE: f32 = 0.12;

pub type Rgb = [u8; 3];

pub fn rgb(c: Rgb) -> Color {
    Color::from_rgba(c[0], c[1], c[2], 255)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    pub backdrop: Rgb,
    pub text: Rgb,
    pub head: Rgb,
    pub body: Rgb,
    pub food: Rgb,
    pub title: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0, 0, 0],
            backdrop: [30, 30, 30],
            text: [200, 90, 40],
            head: [0, 150, 0],
            body: [0, 120, 0],
            food: [200, 25, 0],
            title: [200, 200, 0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Edge length of one grid cell in pixels.
    pub cell_size: u32,
    /// Snake moves (and frames) per second.
    pub tick_rate: u32,
    pub initial_length: u32,
    /// Seconds of shake after each eat-event.
    pub shake_duration: f32,
    pub shake_intensity: f32,
    pub window_title: String,
    pub eat_sound: Option<PathBuf>,
    pub sound_volume: f32,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 30,
            cell_size: 20,
            tick_rate: 15,
            initial_length: 2,
            shake_duration: 0.3,
            shake_intensity: 100.0,
            window_title: "Super Snake".to_owned(),
            eat_sound: Some(PathBuf::from("eat.wav")),
            sound_volume: 0.7,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };

        if self.grid_width == 0 || self.grid_height == 0 {
            return invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }
        if self.cell_size == 0 {
            return invalid("cell_size must be positive".to_owned());
        }
        let fits = |a: u32, b: u32| a.checked_mul(b).is_some_and(|n| i32::try_from(n).is_ok());
        if !fits(self.grid_width, self.grid_height) {
            return invalid(format!(
                "grid {}x{} has too many cells",
                self.grid_width, self.grid_height
            ));
        }
        if !fits(self.grid_width, self.cell_size) || !fits(self.grid_height, self.cell_size) {
            return invalid(format!(
                "window for a {}x{} grid of {} px cells is too large",
                self.grid_width, self.grid_height, self.cell_size
            ));
        }
        if self.tick_rate == 0 {
            return invalid("tick_rate must be positive".to_owned());
        }
        if self.initial_length < 2 {
            return invalid(format!(
                "initial_length must be at least 2, got {}",
                self.initial_length
            ));
        }
        // The starting snake lies left of the centre cell, head on the centre.
        if self.initial_length - 1 > self.grid_width / 2 {
            return invalid(format!(
                "initial_length {} does not fit a grid {} cells wide",
                self.initial_length, self.grid_width
            ));
        }
        if !(self.shake_duration >= 0.0 && self.shake_intensity >= 0.0) {
            return invalid("shake_duration and shake_intensity must not be negative".to_owned());
        }
        if !(0.0..=1.0).contains(&self.sound_volume) {
            return invalid(format!(
                "sound_volume must be within 0..=1, got {}",
                self.sound_volume
            ));
        }
        Ok(())
    }

    /// Saturates on configs that failed validation.
    pub fn window_size(&self) -> (u32, u32) {
        (
            self.grid_width.saturating_mul(self.cell_size),
            self.grid_height.saturating_mul(self.cell_size),
        )
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }

    pub fn shake_amplitude(&self) -> f32 {
        self.shake_intensity * SHAKE_AMPLITUDE_SCALE
    }
}
