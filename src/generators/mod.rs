// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generative engines for chord progressions and melodies.
//!
//! Generators take an explicit random source so that a seeded generator
//! reproduces the same output. Timing is expressed in absolute ticks at
//! [`TICKS_PER_QUARTER`] resolution.

pub mod melody;
pub mod progression;

use crate::music::scale::Pitch;

pub use melody::MelodyGenerator;
pub use progression::{select_progression, Progression, ProgressionTemplate, TEMPLATES};

/// Ticks per quarter note (PPQN)
pub const TICKS_PER_QUARTER: u32 = 128;

/// Ticks per 4/4 bar
pub const TICKS_PER_BAR: i64 = TICKS_PER_QUARTER as i64 * 4;

/// Note length: whole notes for chords, eighths for the melody
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteLength {
    Whole,
    Eighth,
}

impl NoteLength {
    /// Division of a whole note
    pub fn division(self) -> u32 {
        match self {
            NoteLength::Whole => 1,
            NoteLength::Eighth => 8,
        }
    }

    /// Duration token ("1" or "8")
    pub fn token(self) -> String {
        self.division().to_string()
    }

    /// Length in ticks at the given resolution
    pub fn ticks(self, ppqn: u32) -> u32 {
        (ppqn * 4) / self.division()
    }
}

/// A note event: one or more pitches struck together
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEvent {
    /// Pitches sounding together (one for melody notes, a triad for chords)
    pub pitches: Vec<Pitch>,
    /// Absolute start tick; humanization can push it below zero
    pub start_tick: i64,
    /// Note length
    pub length: NoteLength,
    /// Velocity (0-127)
    pub velocity: u8,
}

impl NoteEvent {
    /// Create a new note event
    pub fn new(pitches: Vec<Pitch>, start_tick: i64, length: NoteLength, velocity: u8) -> Self {
        Self {
            pitches,
            start_tick,
            length,
            velocity,
        }
    }

    /// Single-pitch note event
    pub fn single(pitch: Pitch, start_tick: i64, length: NoteLength, velocity: u8) -> Self {
        Self::new(vec![pitch], start_tick, length, velocity)
    }

    /// End tick (exclusive) at the crate's resolution
    pub fn end_tick(&self) -> i64 {
        self.start_tick + self.length.ticks(TICKS_PER_QUARTER) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::scale::PitchClass;

    #[test]
    fn test_note_length_ticks() {
        assert_eq!(NoteLength::Whole.ticks(TICKS_PER_QUARTER), 512);
        assert_eq!(NoteLength::Eighth.ticks(TICKS_PER_QUARTER), 64);
        assert_eq!(TICKS_PER_BAR, 512);
    }

    #[test]
    fn test_note_length_tokens() {
        assert_eq!(NoteLength::Whole.token(), "1");
        assert_eq!(NoteLength::Eighth.token(), "8");
    }

    #[test]
    fn test_note_event_creation() {
        let pitch = PitchClass::parse("C").unwrap().at_octave(5);
        let event = NoteEvent::single(pitch, -3, NoteLength::Eighth, 100);
        assert_eq!(event.pitches, vec![pitch]);
        assert_eq!(event.start_tick, -3);
        assert_eq!(event.velocity, 100);
        assert_eq!(event.end_tick(), 61);
    }
}
