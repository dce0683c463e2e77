// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Spelled pitches and scale construction.
//!
//! Pitch classes keep their letter spelling (Bb stays Bb, A# stays A#) so
//! that scales and chord symbols read the way a musician would write them.
//! Scales are built by stepping through consecutive letters and adjusting
//! the accidental until the semitone distance from the root matches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// MIDI note number type (0-127 when in range)
pub type MidiNote = i16;

/// Natural note letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// All letters in ascending order from C
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Position of the letter within the octave (C = 0, B = 6)
    pub fn index(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// Semitones above C of the natural note
    pub fn semitone(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Letter a number of steps above this one, wrapping at B
    pub fn step(self, steps: u8) -> Self {
        Letter::ALL[((self.index() + steps) % 7) as usize]
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        };
        write!(f, "{}", c)
    }
}

/// A spelled pitch class: letter plus accidental (+1 per sharp, -1 per flat)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PitchClass {
    letter: Letter,
    accidental: i8,
}

impl PitchClass {
    pub const fn new(letter: Letter, accidental: i8) -> Self {
        Self { letter, accidental }
    }

    /// Natural pitch class for a letter
    pub const fn natural(letter: Letter) -> Self {
        Self::new(letter, 0)
    }

    pub fn letter(self) -> Letter {
        self.letter
    }

    pub fn accidental(self) -> i8 {
        self.accidental
    }

    /// Chroma (0-11) of this pitch class
    pub fn chroma(self) -> u8 {
        (self.letter.semitone() as i16 + self.accidental as i16).rem_euclid(12) as u8
    }

    /// Parse a spelling such as "C", "c#", "Bb", "F##" or "Dbb".
    ///
    /// The first character is the letter; everything after it must be a run
    /// of `#` or `b`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let letter = Letter::from_char(chars.next()?)?;

        let mut accidental: i8 = 0;
        for c in chars {
            accidental = match c {
                '#' => accidental.checked_add(1)?,
                'b' => accidental.checked_sub(1)?,
                _ => return None,
            };
        }

        Some(Self::new(letter, accidental))
    }

    /// Canonical spelling of the same pitch class.
    ///
    /// Sharps are used when this spelling leans sharp and flats otherwise, so
    /// "E#" becomes "F", "C##" becomes "D" and "Db" is left alone.
    pub fn simplify(self) -> Self {
        Self::from_chroma(self.chroma(), self.accidental > 0)
    }

    /// Spell a chroma with at most one accidental
    pub fn from_chroma(chroma: u8, sharps: bool) -> Self {
        const SHARPS: [(Letter, i8); 12] = [
            (Letter::C, 0),
            (Letter::C, 1),
            (Letter::D, 0),
            (Letter::D, 1),
            (Letter::E, 0),
            (Letter::F, 0),
            (Letter::F, 1),
            (Letter::G, 0),
            (Letter::G, 1),
            (Letter::A, 0),
            (Letter::A, 1),
            (Letter::B, 0),
        ];
        const FLATS: [(Letter, i8); 12] = [
            (Letter::C, 0),
            (Letter::D, -1),
            (Letter::D, 0),
            (Letter::E, -1),
            (Letter::E, 0),
            (Letter::F, 0),
            (Letter::G, -1),
            (Letter::G, 0),
            (Letter::A, -1),
            (Letter::A, 0),
            (Letter::B, -1),
            (Letter::B, 0),
        ];

        let table = if sharps { &SHARPS } else { &FLATS };
        let (letter, accidental) = table[(chroma % 12) as usize];
        Self::new(letter, accidental)
    }

    /// Move up by `steps` letters while landing exactly `semitones` above.
    ///
    /// This is interval transposition: a major third from D is two letters
    /// and four semitones, which yields F# rather than Gb.
    pub fn transpose(self, steps: u8, semitones: u8) -> Self {
        let letter = self.letter.step(steps);
        let target = (self.chroma() as i16 + semitones as i16).rem_euclid(12);
        let mut diff = target - letter.semitone() as i16;
        if diff > 6 {
            diff -= 12;
        } else if diff < -6 {
            diff += 12;
        }
        Self::new(letter, diff as i8)
    }

    /// Place this pitch class at an octave
    pub fn at_octave(self, octave: i8) -> Pitch {
        Pitch::new(self, octave)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)?;
        let symbol = if self.accidental > 0 { "#" } else { "b" };
        for _ in 0..self.accidental.unsigned_abs() {
            f.write_str(symbol)?;
        }
        Ok(())
    }
}

/// A pitch class at a specific octave (scientific pitch notation, C4 = 60)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: i8,
}

impl Pitch {
    pub const fn new(class: PitchClass, octave: i8) -> Self {
        Self { class, octave }
    }

    /// Same spelling one or more octaves up (or down for negative values)
    pub fn shift_octave(self, octaves: i8) -> Self {
        Self::new(self.class, self.octave.saturating_add(octaves))
    }

    /// MIDI note number.
    ///
    /// The octave follows the letter, so B#4 is 72 and Cb4 is 59. The result
    /// may fall outside 0-127; callers writing MIDI must check.
    pub fn midi(self) -> MidiNote {
        (self.octave as i16 + 1) * 12
            + self.class.letter().semitone() as i16
            + self.class.accidental() as i16
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.octave)
    }
}

/// Scale types supported by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    Major,
    Minor, // Natural minor (Aeolian)
    MajorPentatonic,
    MinorPentatonic,
}

impl ScaleType {
    /// Letter steps and semitone offsets from the root for each scale tone
    fn degrees(self) -> &'static [(u8, u8)] {
        match self {
            ScaleType::Major => &[(0, 0), (1, 2), (2, 4), (3, 5), (4, 7), (5, 9), (6, 11)],
            ScaleType::Minor => &[(0, 0), (1, 2), (2, 3), (3, 5), (4, 7), (5, 8), (6, 10)],
            // Degrees 1, 2, 3, 5, 6 of the major scale
            ScaleType::MajorPentatonic => &[(0, 0), (1, 2), (2, 4), (4, 7), (5, 9)],
            // Degrees 1, b3, 4, 5, b7 of the natural minor scale
            ScaleType::MinorPentatonic => &[(0, 0), (2, 3), (3, 5), (4, 7), (6, 10)],
        }
    }

    /// Parse a scale type name as typed by a user.
    ///
    /// Only the two diatonic modes are accepted here; the pentatonic types
    /// are derived internally for melody generation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Some(ScaleType::Major),
            "minor" => Some(ScaleType::Minor),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::Minor => "minor",
            ScaleType::MajorPentatonic => "major pentatonic",
            ScaleType::MinorPentatonic => "minor pentatonic",
        }
    }

    /// Pentatonic variant matching this scale's mode
    pub fn pentatonic(self) -> Self {
        match self {
            ScaleType::Major | ScaleType::MajorPentatonic => ScaleType::MajorPentatonic,
            ScaleType::Minor | ScaleType::MinorPentatonic => ScaleType::MinorPentatonic,
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A scale with root and type
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: PitchClass,
    scale_type: ScaleType,
    notes: Vec<PitchClass>,
}

impl Scale {
    /// Create a new scale from root and type
    pub fn new(root: PitchClass, scale_type: ScaleType) -> Self {
        let notes = scale_type
            .degrees()
            .iter()
            .map(|&(steps, semis)| root.transpose(steps, semis))
            .collect();

        Self {
            root,
            scale_type,
            notes,
        }
    }

    /// Parse a scale from strings (e.g., "C", "major").
    ///
    /// The root is simplified before the scale is built.
    pub fn parse(root_str: &str, scale_str: &str) -> Option<Self> {
        let root = PitchClass::parse(root_str)?.simplify();
        let scale_type = ScaleType::from_str(scale_str)?;
        Some(Scale::new(root, scale_type))
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// Get the notes in this scale
    pub fn notes(&self) -> &[PitchClass] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Check if a pitch class is in this scale (by spelling)
    pub fn contains(&self, note: PitchClass) -> bool {
        self.notes.contains(&note)
    }

    /// Pentatonic scale on the same root matching this scale's mode
    pub fn pentatonic(&self) -> Scale {
        Scale::new(self.root, self.scale_type.pentatonic())
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.scale_type)
    }
}

/// A musical key: the root and diatonic mode a generation request asks for
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    scale: Scale,
}

impl Key {
    pub fn new(root: PitchClass, scale_type: ScaleType) -> Self {
        Self {
            scale: Scale::new(root, scale_type),
        }
    }

    /// Parse a key from strings
    pub fn parse(root_str: &str, scale_str: &str) -> Option<Self> {
        Scale::parse(root_str, scale_str).map(|scale| Key { scale })
    }

    pub fn root(&self) -> PitchClass {
        self.scale.root()
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale.scale_type()
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scale)
    }
}
