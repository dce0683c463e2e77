// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Track assembly and MIDI file export.
//!
//! This module provides:
//! - Event assembly from a progression and melody
//! - Standard MIDI file export
//! - Output filenames derived from the progression

pub mod smf;
pub mod track;

use thiserror::Error;

use crate::music::chord::ChordSymbol;
use crate::music::scale::{MidiNote, Pitch};

pub use smf::MidiExporter;
pub use track::{Track, TrackAssembler, TrackEvent};

/// Characters removed from generated filenames
const UNSAFE_FILENAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Errors raised while writing MIDI data
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("pitch {pitch} (MIDI {midi}) is outside the MIDI note range")]
    PitchOutOfRange { pitch: Pitch, midi: MidiNote },

    #[error("velocity {0} is outside the MIDI range")]
    VelocityOutOfRange(u8),

    #[error("instrument {0} is not a General MIDI program (1-128)")]
    InvalidInstrument(u8),

    #[error("channel {0} is not a MIDI channel (0-15)")]
    InvalidChannel(u8),

    #[error("event at tick {0} is too far from the previous event")]
    TickOverflow(u64),

    #[error("failed to write MIDI data")]
    Io(#[from] std::io::Error),
}

/// Filename for a progression: symbols joined by underscores, sanitized
pub fn progression_filename(chords: &[ChordSymbol]) -> String {
    let joined = chords
        .iter()
        .map(|chord| chord.to_string())
        .collect::<Vec<_>>()
        .join("_");
    sanitize_filename(&format!("{}.mid", joined))
}

/// Spell out sharps and drop characters most filesystems reject
pub fn sanitize_filename(name: &str) -> String {
    name.replace('#', "sharp")
        .chars()
        .filter(|c| !UNSAFE_FILENAME_CHARS.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_sharps() {
        assert_eq!(sanitize_filename("C#maj_Dmin.mid"), "Csharpmaj_Dmin.mid");
    }

    #[test]
    fn test_sanitize_unsafe_chars() {
        assert_eq!(sanitize_filename("a/b\\c:d*e?f\"g<h>i|j.mid"), "abcdefghij.mid");
        assert_eq!(sanitize_filename("Bbmin_Ebmaj.mid"), "Bbmin_Ebmaj.mid");
    }

    #[test]
    fn test_progression_filename() {
        let chords = [
            ChordSymbol::parse("C#maj").unwrap(),
            ChordSymbol::parse("Dmin").unwrap(),
        ];
        assert_eq!(progression_filename(&chords), "Csharpmaj_Dmin.mid");
    }

    #[test]
    fn test_error_messages() {
        let err = ExportError::InvalidInstrument(0);
        assert_eq!(err.to_string(), "instrument 0 is not a General MIDI program (1-128)");
    }
}
