use std::path::Path;

use log::{info, warn};
use macroquad::audio::{PlaySoundParams, Sound, load_sound, load_sound_from_bytes, play_sound};

use crate::effects::EatSound;
use crate::error::AudioError;

const SAMPLE_RATE: u32 = 44_100;
const FALLBACK_FREQUENCY: f32 = 700.0;
const FALLBACK_SECONDS: f32 = 0.1;
const FALLBACK_VOLUME: f32 = 0.5;
const ENVELOPE_SECONDS: f32 = 0.01;

/// Mono 16-bit PCM WAV of a sine tone, with a short linear fade in and out
/// so it doesn't click.
pub fn synth_beep(frequency_hz: f32, duration_seconds: f32, volume: f32) -> Vec<u8> {
    let num_samples = (duration_seconds.max(0.0) * SAMPLE_RATE as f32) as u32;
    let mut data: Vec<u8> = Vec::with_capacity((num_samples as usize) * 2 + 44);

    let block_align: u16 = 2;
    let byte_rate: u32 = SAMPLE_RATE * block_align as u32;
    let data_size: u32 = num_samples * 2;
    let chunk_size: u32 = 36 + data_size;

    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&chunk_size.to_le_bytes());
    data.extend_from_slice(b"WAVE");
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM
    data.extend_from_slice(&1u16.to_le_bytes()); // mono
    data.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes());
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    let envelope = ((ENVELOPE_SECONDS * SAMPLE_RATE as f32) as u32).clamp(1, num_samples.max(1));
    let amplitude = 0.5 * volume.clamp(0.0, 1.0);
    for n in 0..num_samples {
        let t = n as f32 / SAMPLE_RATE as f32;
        let fade_in = (n as f32 / envelope as f32).min(1.0);
        let fade_out = ((num_samples - 1 - n) as f32 / envelope as f32).min(1.0);
        let wave = (std::f32::consts::TAU * frequency_hz * t).sin();
        let sample = (amplitude * fade_in * fade_out * wave * i16::MAX as f32) as i16;
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

/// The eat sound as macroquad plays it. `None` means silent.
pub struct MacroquadSound {
    sound: Option<Sound>,
    volume: f32,
}

impl MacroquadSound {
    pub fn silent() -> Self {
        Self { sound: None, volume: 0.0 }
    }

    pub fn is_silent(&self) -> bool {
        self.sound.is_none()
    }

    /// Loads `path` if it exists, otherwise synthesizes a beep; falls back
    /// to silence if neither works. Every fallback is logged at warn.
    pub async fn load(path: Option<&Path>, volume: f32) -> Self {
        let loaded = match locate(path) {
            Ok(path) => from_file(path).await,
            Err(err) => Err(err),
        };
        match loaded {
            Ok(sound) => return Self { sound: Some(sound), volume },
            Err(err) => warn!("{err}"),
        }

        match load_sound_from_bytes(&synth_beep(FALLBACK_FREQUENCY, FALLBACK_SECONDS, FALLBACK_VOLUME)).await {
            Ok(sound) => {
                warn!("using synthesized beep for the eat sound");
                Self { sound: Some(sound), volume: 1.0 }
            }
            Err(err) => {
                warn!("no eat sound available, running silent: {err:?}");
                Self::silent()
            }
        }
    }
}

fn locate(path: Option<&Path>) -> Result<&Path, AudioError> {
    match path {
        None => Err(AudioError::Load("no eat sound configured".to_owned())),
        Some(path) if path.is_file() => Ok(path),
        Some(path) => Err(AudioError::Load(format!("{}: no such file", path.display()))),
    }
}

async fn from_file(path: &Path) -> Result<Sound, AudioError> {
    let sound = load_sound(&path.to_string_lossy())
        .await
        .map_err(|err| AudioError::Load(format!("{}: {err:?}", path.display())))?;
    info!("loaded eat sound from {}", path.display());
    Ok(sound)
}

impl EatSound for MacroquadSound {
    fn play(&mut self) -> Result<(), AudioError> {
        if let Some(sound) = &self.sound {
            play_sound(sound, PlaySoundParams { looped: false, volume: self.volume });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header() {
        let bytes = synth_beep(700.0, 0.1, 0.5);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[36..40], b"data");
        let data_size = u32::from_le_bytes([bytes[40], bytes[41], bytes[42], bytes[43]]);
        assert_eq!(data_size, 4410 * 2);
        assert_eq!(bytes.len(), 44 + data_size as usize);
    }

    #[test]
    fn beep_fades_in_and_out() {
        let bytes = synth_beep(700.0, 0.1, 1.0);
        let first = i16::from_le_bytes([bytes[44], bytes[45]]);
        let n = bytes.len();
        let last = i16::from_le_bytes([bytes[n - 2], bytes[n - 1]]);
        assert_eq!(first, 0);
        assert_eq!(last, 0);
        let peak = bytes[44..]
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]).unsigned_abs())
            .max()
            .unwrap();
        assert!(peak > i16::MAX as u16 / 4);
        assert!(peak <= i16::MAX as u16 / 2 + 1);
    }

    #[test]
    fn empty_tone_is_just_a_header() {
        assert_eq!(synth_beep(440.0, 0.0, 1.0).len(), 44);
    }

    #[test]
    fn missing_sound_file_is_a_load_error() {
        let err = locate(Some(Path::new("sounds/not-there.wav"))).unwrap_err();
        assert!(matches!(&err, AudioError::Load(msg) if msg.contains("not-there.wav")));
        assert!(matches!(locate(None), Err(AudioError::Load(_))));

        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        assert_eq!(locate(Some(manifest.as_path())).unwrap(), manifest.as_path());
    }

    #[test]
    fn silent_sound_plays_nothing() {
        let mut sound = MacroquadSound::silent();
        assert!(sound.is_silent());
        assert!(sound.play().is_ok());
    }
}
