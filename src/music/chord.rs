// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Diatonic triads and chord inversion.
//!
//! A chord symbol is a spelled root plus a triad quality ("Cmaj", "F#min",
//! "Bdim"). The diatonic pool for a key holds one symbol per scale degree,
//! with qualities fixed per scale type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::scale::{Pitch, PitchClass, Scale, ScaleType};

/// Number of chords in a diatonic pool (one per degree of a heptatonic scale)
pub const POOL_SIZE: usize = 7;

/// Triad quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
}

impl ChordQuality {
    /// Qualities by scale degree for a major key
    pub const MAJOR_KEY: [ChordQuality; POOL_SIZE] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Minor,
        ChordQuality::Major,
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
    ];

    /// Qualities by scale degree for a natural minor key
    pub const MINOR_KEY: [ChordQuality; POOL_SIZE] = [
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Minor,
        ChordQuality::Major,
        ChordQuality::Major,
    ];

    /// Degree qualities for a scale type, if it is a diatonic mode
    pub fn for_scale_type(scale_type: ScaleType) -> Option<&'static [ChordQuality; POOL_SIZE]> {
        match scale_type {
            ScaleType::Major => Some(&Self::MAJOR_KEY),
            ScaleType::Minor => Some(&Self::MINOR_KEY),
            ScaleType::MajorPentatonic | ScaleType::MinorPentatonic => None,
        }
    }

    /// Symbol suffix
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "maj",
            ChordQuality::Minor => "min",
            ChordQuality::Diminished => "dim",
        }
    }

    /// Letter steps and semitones of the third and fifth above the root
    fn upper_tones(self) -> [(u8, u8); 2] {
        match self {
            ChordQuality::Major => [(2, 4), (4, 7)],
            ChordQuality::Minor => [(2, 3), (4, 7)],
            ChordQuality::Diminished => [(2, 3), (4, 6)],
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "maj" => Some(ChordQuality::Major),
            "min" => Some(ChordQuality::Minor),
            "dim" => Some(ChordQuality::Diminished),
            _ => None,
        }
    }
}

/// A chord symbol: root plus triad quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChordSymbol {
    pub root: PitchClass,
    pub quality: ChordQuality,
}

impl ChordSymbol {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        Self { root, quality }
    }

    /// Parse a symbol such as "Cmaj", "C#min" or "Bbdim"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return None;
        }
        let (root, suffix) = s.split_at(s.len() - 3);
        Some(Self::new(
            PitchClass::parse(root)?,
            ChordQuality::from_suffix(suffix)?,
        ))
    }

    /// Triad tones in root, third, fifth order
    pub fn tones(&self) -> [PitchClass; 3] {
        let [third, fifth] = self.quality.upper_tones();
        [
            self.root,
            self.root.transpose(third.0, third.1),
            self.root.transpose(fifth.0, fifth.1),
        ]
    }

    /// Chord tones with every tone placed at the same octave number.
    ///
    /// Amin at octave 4 is A4 C4 E4: the list keeps root-third-fifth order
    /// even though C4 sounds below A4.
    pub fn notes_at(&self, octave: i8) -> Vec<Pitch> {
        self.tones()
            .iter()
            .map(|tone| tone.at_octave(octave))
            .collect()
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality.suffix())
    }
}

/// The seven diatonic chords of a key, indexed by scale degree
#[derive(Debug, Clone, PartialEq)]
pub struct ChordPool {
    chords: Vec<ChordSymbol>,
}

impl ChordPool {
    /// Build the pool for a diatonic scale.
    ///
    /// Returns `None` unless the scale has exactly seven tones and a known
    /// quality template.
    pub fn from_scale(scale: &Scale) -> Option<Self> {
        let chords = resolve_diatonic_chords(scale);
        if chords.len() != POOL_SIZE {
            return None;
        }
        Some(Self { chords })
    }

    /// Chord at a 1-based scale degree
    pub fn degree(&self, degree: u8) -> Option<ChordSymbol> {
        if degree == 0 {
            return None;
        }
        self.chords.get(degree as usize - 1).copied()
    }

    pub fn chords(&self) -> &[ChordSymbol] {
        &self.chords
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn contains(&self, chord: &ChordSymbol) -> bool {
        self.chords.contains(chord)
    }
}

/// Diatonic chord symbols for each degree of a scale.
///
/// Empty when the scale has no tones, is not heptatonic, or is not one of
/// the two diatonic modes.
pub fn resolve_diatonic_chords(scale: &Scale) -> Vec<ChordSymbol> {
    let Some(qualities) = ChordQuality::for_scale_type(scale.scale_type()) else {
        return Vec::new();
    };
    if scale.len() != POOL_SIZE {
        return Vec::new();
    }

    scale
        .notes()
        .iter()
        .zip(qualities.iter())
        .map(|(&root, &quality)| ChordSymbol::new(root, quality))
        .collect()
}

/// Invert a chord by moving front notes to the back an octave higher.
///
/// "Lowest" means first in the list, not lowest sounding. Counts above the
/// chord size keep cycling: every full pass raises each tone one octave.
pub fn invert(notes: &[Pitch], inversion: usize) -> Vec<Pitch> {
    let mut result = notes.to_vec();
    let size = result.len();
    if size == 0 {
        return result;
    }

    let passes = inversion / size;
    let moved = inversion % size;
    result.rotate_left(moved);

    for (i, pitch) in result.iter_mut().enumerate() {
        let lift = passes + usize::from(i >= size - moved);
        *pitch = pitch.shift_octave(i8::try_from(lift).unwrap_or(i8::MAX));
    }
    result
}
