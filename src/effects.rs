//! Cosmetic reactions to eating: a sound and a short screen shake. Nothing
//! here feeds back into the grid.

use log::warn;
use rand::Rng;
use rand::rngs::SmallRng;

use crate::config::GameConfig;
use crate::error::AudioError;
use crate::game::GameEvent;

/// Something that can play the eat sound.
pub trait EatSound {
    fn play(&mut self) -> Result<(), AudioError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScreenShake {
    remaining: f32,
    duration: f32,
    amplitude: f32,
}

impl ScreenShake {
    pub fn new(duration: f32, amplitude: f32) -> Self {
        Self {
            remaining: 0.0,
            duration: duration.max(0.0),
            amplitude: amplitude.max(0.0),
        }
    }

    pub fn trigger(&mut self) {
        self.remaining = self.duration;
    }

    pub fn update(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Whole-pixel jitter, zero once the shake has run out.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> (f32, f32) {
        if !self.is_active() || self.amplitude == 0.0 {
            return (0.0, 0.0);
        }
        let x = rng.gen_range(-1.0f32..=1.0) * self.amplitude;
        let y = rng.gen_range(-1.0f32..=1.0) * self.amplitude;
        (x.trunc(), y.trunc())
    }
}

pub struct Effects<S, R = SmallRng> {
    shake: ScreenShake,
    sound: S,
    rng: R,
    offset: (f32, f32),
}

impl<S: EatSound, R: Rng> Effects<S, R> {
    pub fn new(config: &GameConfig, sound: S, rng: R) -> Self {
        Self {
            shake: ScreenShake::new(config.shake_duration, config.shake_amplitude()),
            sound,
            rng,
            offset: (0.0, 0.0),
        }
    }

    pub fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::FoodEaten { .. } = event {
            if let Err(err) = self.sound.play() {
                warn!("{err}");
            }
            self.shake.trigger();
        }
    }

    /// Once per frame, after events have been handled.
    pub fn update(&mut self, dt: f32) {
        self.shake.update(dt);
        self.offset = self.shake.sample(&mut self.rng);
    }

    /// Pixel offset for this frame's scene.
    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    pub fn shake(&self) -> &ScreenShake {
        &self.shake
    }
}
