// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generation settings.
//!
//! Holds the density and humanization constants used by the melody
//! generator and the track assembler. Every field has a default, so a
//! settings file only needs to name what it changes. Files are YAML unless
//! the extension is `.toml`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lowest octave in which every spelled tone (Cb through B#) is a MIDI note
pub const MIN_OCTAVE: i8 = 0;

/// Highest octave in which every spelled tone (Cb through B#) is a MIDI note
pub const MAX_OCTAVE: i8 = 8;

/// Highest chord inversion a settings file may request
pub const MAX_INVERSION: usize = 3;

/// Tones in a voiced triad
const TRIAD_SIZE: usize = 3;

/// Inclusive range sampled uniformly
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T> Span<T>
where
    T: SampleUniform + PartialOrd + Copy,
{
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Draw a value in `min..=max`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        if self.min < self.max {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Root settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Melody density and humanization
    pub melody: MelodySettings,
    /// Chord voicing and humanization
    pub chords: ChordSettings,
    /// General MIDI instrument number (1-128, 1 = acoustic grand piano)
    pub instrument: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            melody: MelodySettings::default(),
            chords: ChordSettings::default(),
            instrument: 1,
        }
    }
}

impl Settings {
    /// Load settings from a YAML or TOML file and validate them
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let settings = if is_toml {
            Self::from_toml(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };

        settings
            .validate()
            .with_context(|| format!("Invalid settings in {:?}", path))?;
        Ok(settings)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML settings")
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML settings")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }

    /// Check ranges and probabilities
    pub fn validate(&self) -> Result<()> {
        if !(1..=128).contains(&self.instrument) {
            bail!("instrument must be between 1 and 128, got {}", self.instrument);
        }
        self.melody.validate()?;
        self.chords.validate()?;
        Ok(())
    }
}

/// Melody generator settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MelodySettings {
    /// Bars of melody to generate
    pub bars: u32,
    /// Chance that an eighth-note slot sounds (0.0 - 1.0)
    pub note_probability: f64,
    /// Octaves a melody note may land in
    pub octaves: Vec<i8>,
    /// Timing humanization in ticks
    pub jitter: Span<i64>,
    /// Note velocity range
    pub velocity: Span<u8>,
}

impl Default for MelodySettings {
    fn default() -> Self {
        Self {
            bars: 4,
            note_probability: 0.6,
            octaves: vec![5, 6],
            jitter: Span::new(-5, 4),
            velocity: Span::new(90, 119),
        }
    }
}

impl MelodySettings {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.note_probability) {
            bail!(
                "melody.note_probability must be within 0.0 and 1.0, got {}",
                self.note_probability
            );
        }
        if self.octaves.is_empty() {
            bail!("melody.octaves must list at least one octave");
        }
        if let Some(octave) = self
            .octaves
            .iter()
            .find(|o| !(MIN_OCTAVE..=MAX_OCTAVE).contains(*o))
        {
            bail!(
                "melody.octaves entry {} must be within {} and {}",
                octave,
                MIN_OCTAVE,
                MAX_OCTAVE
            );
        }
        if !self.jitter.is_ordered() {
            bail!("melody.jitter min is greater than max");
        }
        validate_velocity("melody.velocity", &self.velocity)
    }
}

/// Chord voicing settings for the track assembler
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChordSettings {
    /// Octave every chord tone starts in before inversion
    pub octave: i8,
    /// Highest inversion drawn per chord (inclusive)
    pub max_inversion: usize,
    /// Chord velocity range
    pub velocity: Span<u8>,
    /// Timing humanization in ticks
    pub offset: Span<i64>,
}

impl Default for ChordSettings {
    fn default() -> Self {
        Self {
            octave: 4,
            max_inversion: 2,
            velocity: Span::new(80, 109),
            offset: Span::new(-10, 9),
        }
    }
}

impl ChordSettings {
    fn validate(&self) -> Result<()> {
        if self.max_inversion > MAX_INVERSION {
            bail!(
                "chords.max_inversion must be at most {}, got {}",
                MAX_INVERSION,
                self.max_inversion
            );
        }
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&self.octave) {
            bail!(
                "chords.octave {} must be within {} and {}",
                self.octave,
                MIN_OCTAVE,
                MAX_OCTAVE
            );
        }
        // Each full pass over the triad lifts a tone one more octave
        let raised = self.max_inversion.div_ceil(TRIAD_SIZE) as i8;
        if self.octave + raised > MAX_OCTAVE {
            bail!(
                "chords.octave {} with max_inversion {} lifts tones above octave {}",
                self.octave,
                self.max_inversion,
                MAX_OCTAVE
            );
        }
        if !self.offset.is_ordered() {
            bail!("chords.offset min is greater than max");
        }
        validate_velocity("chords.velocity", &self.velocity)
    }
}

fn validate_velocity(name: &str, span: &Span<u8>) -> Result<()> {
    if !span.is_ordered() {
        bail!("{} min is greater than max", name);
    }
    if span.min == 0 {
        bail!("{} min must be at least 1; velocity 0 is a note-off", name);
    }
    if span.max > 127 {
        bail!("{} max must be at most 127, got {}", name, span.max);
    }
    Ok(())
}
