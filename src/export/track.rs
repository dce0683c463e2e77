// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Single-track event assembly.
//!
//! Turns a progression and a melody into the ordered event list handed to
//! the serializer: one program change, one whole-note event per chord, then
//! the melody notes. Events keep insertion order; the serializer places
//! them by their absolute start tick.

use rand::Rng;
use tracing::debug;

use crate::config::ChordSettings;
use crate::generators::{NoteEvent, NoteLength, Progression, TICKS_PER_BAR};
use crate::music::chord::invert;

/// General MIDI instrument 1
pub const ACOUSTIC_GRAND_PIANO: u8 = 1;

/// An event in an assembled track
#[derive(Debug, Clone, PartialEq)]
pub enum TrackEvent {
    /// Select a General MIDI instrument (1-128)
    ProgramChange { instrument: u8 },
    /// One or more pitches struck together
    Note(NoteEvent),
}

/// Ordered events for one instrument channel
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// MIDI channel (0-15)
    pub channel: u8,
    events: Vec<TrackEvent>,
}

impl Track {
    /// Create an empty track on a channel
    pub fn new(channel: u8) -> Self {
        Self {
            channel,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: TrackEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Note events in insertion order
    pub fn notes(&self) -> impl Iterator<Item = &NoteEvent> {
        self.events.iter().filter_map(|event| match event {
            TrackEvent::Note(note) => Some(note),
            TrackEvent::ProgramChange { .. } => None,
        })
    }
}

/// Builds tracks from a progression and melody
#[derive(Debug, Clone)]
pub struct TrackAssembler {
    chords: ChordSettings,
    instrument: u8,
}

impl Default for TrackAssembler {
    fn default() -> Self {
        Self::new(ChordSettings::default(), ACOUSTIC_GRAND_PIANO)
    }
}

impl TrackAssembler {
    pub fn new(chords: ChordSettings, instrument: u8) -> Self {
        Self { chords, instrument }
    }

    /// Assemble the track.
    ///
    /// Chord `i` starts at `i` bars plus a random offset, with a random
    /// inversion and velocity. Melody events are appended unchanged.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        progression: &Progression,
        melody: &[NoteEvent],
        rng: &mut R,
    ) -> Track {
        let mut track = Track::new(0);
        track.push(TrackEvent::ProgramChange {
            instrument: self.instrument,
        });

        for (i, chord) in progression.chords().iter().enumerate() {
            let notes = chord.notes_at(self.chords.octave);
            let inversion = rng.gen_range(0..=self.chords.max_inversion);
            let velocity = self.chords.velocity.sample(rng);
            let offset = self.chords.offset.sample(rng);

            debug!(%chord, inversion, velocity, offset, "voiced chord");

            track.push(TrackEvent::Note(NoteEvent::new(
                invert(&notes, inversion),
                i as i64 * TICKS_PER_BAR + offset,
                NoteLength::Whole,
                velocity,
            )));
        }

        for note in melody {
            track.push(TrackEvent::Note(note.clone()));
        }

        track
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Span;
    use crate::generators::progression::TEMPLATES;
    use crate::music::chord::ChordPool;
    use crate::music::scale::{Key, PitchClass};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn progression() -> Progression {
        let key = Key::parse("C", "major").unwrap();
        let pool = ChordPool::from_scale(key.scale()).unwrap();
        Progression::from_template(TEMPLATES[0], &pool)
    }

    fn melody_note(tick: i64) -> NoteEvent {
        let pitch = PitchClass::parse("E").unwrap().at_octave(5);
        NoteEvent::single(pitch, tick, NoteLength::Eighth, 100)
    }

    #[test]
    fn test_event_order() {
        let melody = vec![melody_note(-2), melody_note(30), melody_note(64)];
        let mut rng = StdRng::seed_from_u64(4);
        let track = TrackAssembler::default().assemble(&progression(), &melody, &mut rng);

        assert_eq!(track.len(), 1 + 4 + 3);
        assert_eq!(
            track.events()[0],
            TrackEvent::ProgramChange {
                instrument: ACOUSTIC_GRAND_PIANO
            }
        );

        let notes: Vec<&NoteEvent> = track.notes().collect();
        for chord in &notes[..4] {
            assert_eq!(chord.pitches.len(), 3);
            assert_eq!(chord.length, NoteLength::Whole);
        }
        assert_eq!(notes[4..].to_vec(), melody.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_chord_humanization_ranges() {
        let prog = progression();
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let track = TrackAssembler::default().assemble(&prog, &[], &mut rng);

            for (i, (event, chord)) in track.notes().zip(prog.chords()).enumerate() {
                assert!((80..=109).contains(&event.velocity));
                let offset = event.start_tick - i as i64 * TICKS_PER_BAR;
                assert!((-10..=9).contains(&offset));

                let root_position = chord.notes_at(4);
                let matches = (0..=2).any(|k| invert(&root_position, k) == event.pitches);
                assert!(matches, "{:?} is not an inversion of {}", event.pitches, chord);
            }
        }
    }

    #[test]
    fn test_fixed_settings_are_exact() {
        let settings = ChordSettings {
            max_inversion: 0,
            velocity: Span::new(96, 96),
            offset: Span::new(0, 0),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let track = TrackAssembler::new(settings, 33).assemble(&progression(), &[], &mut rng);

        assert_eq!(track.events()[0], TrackEvent::ProgramChange { instrument: 33 });
        let starts: Vec<i64> = track.notes().map(|n| n.start_tick).collect();
        assert_eq!(starts, vec![0, 512, 1024, 1536]);

        let first: Vec<String> = track.notes().next().unwrap().pitches.iter().map(|p| p.to_string()).collect();
        assert_eq!(first, ["C4", "E4", "G4"]);
        assert!(track.notes().all(|n| n.velocity == 96));
    }

    #[test]
    fn test_assembly_deterministic_per_seed() {
        let prog = progression();
        let a = TrackAssembler::default().assemble(&prog, &[], &mut StdRng::seed_from_u64(8));
        let b = TrackAssembler::default().assemble(&prog, &[], &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
    }
}
