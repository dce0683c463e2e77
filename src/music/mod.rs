// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities.
//!
//! This module provides spelled pitches, scale construction and the
//! diatonic chord vocabulary used by the generators.

pub mod chord;
pub mod scale;

pub use chord::{invert, resolve_diatonic_chords, ChordPool, ChordQuality, ChordSymbol};
pub use scale::{Key, Letter, Pitch, PitchClass, Scale, ScaleType};
