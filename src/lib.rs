// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! AFROCHORD - afrobeats chord progression and melody generator.
//!
//! Given a key such as "C minor", picks a four-chord diatonic progression,
//! voices it with random inversions and humanized timing, adds a pentatonic
//! melody and writes the result as a single-track MIDI file.

pub mod config;
pub mod export;
pub mod generators;
pub mod music;
pub mod session;

pub use config::Settings;
pub use session::{GenerateError, Generation, ScaleRequest, Session};
