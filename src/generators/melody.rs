// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pentatonic melody generator.
//!
//! Each bar is split into eight slots. A slot either sounds an eighth note
//! drawn from the key's pentatonic scale or rests. Sounding notes get a
//! random octave, a small timing nudge and a random velocity.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::{NoteEvent, NoteLength, TICKS_PER_BAR};
use crate::config::MelodySettings;
use crate::music::scale::{Key, Scale};

/// Slots per bar
pub const SLOTS_PER_BAR: u32 = 8;

/// Tick distance between slot starts
pub const SLOT_TICKS: i64 = 32;

/// Melody generator
#[derive(Debug, Clone, Default)]
pub struct MelodyGenerator {
    settings: MelodySettings,
}

impl MelodyGenerator {
    /// Create a new melody generator
    pub fn new(settings: MelodySettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MelodySettings {
        &self.settings
    }

    /// Generate `bars` bars of melody for a key.
    ///
    /// Returns at most `bars * 8` events in slot order. Start ticks are not
    /// monotonic since each note is nudged independently, and the very first
    /// slot can start before tick 0.
    pub fn generate<R: Rng + ?Sized>(&self, key: &Key, bars: u32, rng: &mut R) -> Vec<NoteEvent> {
        let pentatonic = key.scale().pentatonic();
        self.generate_in(&pentatonic, bars, rng)
    }

    /// Generate over an already resolved scale
    pub fn generate_in<R: Rng + ?Sized>(
        &self,
        scale: &Scale,
        bars: u32,
        rng: &mut R,
    ) -> Vec<NoteEvent> {
        if scale.is_empty() || self.settings.octaves.is_empty() {
            debug!(scale = %scale, "no melody tones available");
            return Vec::new();
        }

        let mut events = Vec::new();

        for bar in 0..bars {
            for slot in 0..SLOTS_PER_BAR {
                if !rng.gen_bool(self.settings.note_probability.clamp(0.0, 1.0)) {
                    continue;
                }

                let (Some(&class), Some(&octave)) = (
                    scale.notes().choose(rng),
                    self.settings.octaves.choose(rng),
                ) else {
                    continue;
                };

                let jitter = self.settings.jitter.sample(rng);
                let start = bar as i64 * TICKS_PER_BAR + slot as i64 * SLOT_TICKS + jitter;
                let velocity = self.settings.velocity.sample(rng);

                events.push(NoteEvent::single(
                    class.at_octave(octave),
                    start,
                    NoteLength::Eighth,
                    velocity,
                ));
            }
        }

        debug!(bars, notes = events.len(), "generated melody");
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Span;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> MelodyGenerator {
        MelodyGenerator::default()
    }

    #[test]
    fn test_melody_length_bounded() {
        let key = Key::parse("C", "major").unwrap();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let events = generator().generate(&key, 4, &mut rng);
            assert!(events.len() <= 32);
        }
    }

    #[test]
    fn test_melody_uses_pentatonic_tones() {
        for (root, scale) in [("C", "major"), ("A", "minor"), ("F#", "minor"), ("Bb", "major")] {
            let key = Key::parse(root, scale).unwrap();
            let pentatonic = key.scale().pentatonic();
            let mut rng = StdRng::seed_from_u64(9);

            for event in generator().generate(&key, 4, &mut rng) {
                assert_eq!(event.pitches.len(), 1);
                assert!(pentatonic.contains(event.pitches[0].class));
            }
        }
    }

    #[test]
    fn test_melody_event_fields() {
        let key = Key::parse("D", "minor").unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let events = generator().generate(&key, 4, &mut rng);
        assert!(!events.is_empty());

        for event in &events {
            assert_eq!(event.length, NoteLength::Eighth);
            assert!((90..=119).contains(&event.velocity));
            assert!([5, 6].contains(&event.pitches[0].octave));

            // Start must sit within the jitter window of the nearest slot
            let nearest_slot = (event.start_tick + SLOT_TICKS / 2).div_euclid(SLOT_TICKS) * SLOT_TICKS;
            assert!((-5..=4).contains(&(event.start_tick - nearest_slot)));
            assert!(event.start_tick >= -5);
            assert!(event.start_tick <= 3 * TICKS_PER_BAR + 7 * SLOT_TICKS + 4);
        }
    }

    #[test]
    fn test_melody_deterministic_per_seed() {
        let key = Key::parse("G", "major").unwrap();
        let a = generator().generate(&key, 4, &mut StdRng::seed_from_u64(77));
        let b = generator().generate(&key, 4, &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_density_fills_every_slot() {
        let settings = MelodySettings {
            note_probability: 1.0,
            jitter: Span::new(0, 0),
            ..Default::default()
        };
        let key = Key::parse("C", "major").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let events = MelodyGenerator::new(settings).generate(&key, 2, &mut rng);

        assert_eq!(events.len(), 16);
        let starts: Vec<i64> = events.iter().map(|e| e.start_tick).collect();
        let expected: Vec<i64> = (0..2)
            .flat_map(|bar| (0..8).map(move |slot| bar * TICKS_PER_BAR + slot * SLOT_TICKS))
            .collect();
        assert_eq!(starts, expected);
    }

    #[test]
    fn test_zero_density_is_silent() {
        let settings = MelodySettings {
            note_probability: 0.0,
            ..Default::default()
        };
        let key = Key::parse("C", "major").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(MelodyGenerator::new(settings).generate(&key, 4, &mut rng).is_empty());
    }

    #[test]
    fn test_no_octaves_yields_empty_melody() {
        let settings = MelodySettings {
            octaves: Vec::new(),
            ..Default::default()
        };
        let key = Key::parse("C", "major").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(MelodyGenerator::new(settings).generate(&key, 4, &mut rng).is_empty());
    }

    #[test]
    fn test_zero_bars() {
        let key = Key::parse("C", "major").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generator().generate(&key, 0, &mut rng).is_empty());
    }
}
