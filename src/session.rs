// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generation session.
//!
//! Parses a "<root> <type>" request, runs the theory, progression, melody,
//! assembly and export stages, and keeps the last displayed progression.
//! A failed request leaves the session untouched.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::export::{progression_filename, ExportError, MidiExporter, Track, TrackAssembler};
use crate::generators::{select_progression, MelodyGenerator, NoteEvent, Progression};
use crate::music::chord::ChordPool;
use crate::music::scale::{Key, PitchClass, ScaleType};

/// Errors surfaced to the user by a generate request
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("expected a root and a scale type such as \"C minor\", got {0:?}")]
    Parse(String),

    #[error("unsupported scale type {0:?}; use major or minor")]
    Validation(String),

    #[error("could not build a scale from root {0:?}")]
    TheoryResolution(String),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// A validated request
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleRequest {
    /// Root as typed
    pub root: String,
    /// Requested diatonic mode
    pub scale_type: ScaleType,
}

impl ScaleRequest {
    /// Split and validate free text such as "C minor".
    ///
    /// Exactly two whitespace-separated words are required. The type is
    /// checked here; the root is checked when the scale is resolved.
    pub fn parse(input: &str) -> Result<Self, GenerateError> {
        let words: Vec<&str> = input.split_whitespace().collect();
        let [root, kind] = words.as_slice() else {
            return Err(GenerateError::Parse(input.to_string()));
        };

        let scale_type = ScaleType::from_str(kind)
            .ok_or_else(|| GenerateError::Validation(kind.to_lowercase()))?;

        Ok(Self {
            root: root.to_string(),
            scale_type,
        })
    }

    /// Simplify the root and build the key
    pub fn resolve_key(&self) -> Result<Key, GenerateError> {
        let root = PitchClass::parse(&self.root)
            .ok_or_else(|| GenerateError::TheoryResolution(self.root.clone()))?
            .simplify();
        Ok(Key::new(root, self.scale_type))
    }
}

/// Everything one successful request produced
#[derive(Debug, Clone)]
pub struct Generation {
    pub key: Key,
    pub pool: ChordPool,
    pub progression: Progression,
    pub melody: Vec<NoteEvent>,
    pub track: Track,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Generation {
    /// Write the MIDI bytes into `dir` under the progression filename
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(&self.filename);
        fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), bytes = self.bytes.len(), "wrote MIDI file");
        Ok(path)
    }
}

/// Owns settings and the displayed progression
#[derive(Debug, Clone, Default)]
pub struct Session {
    settings: Settings,
    exporter: MidiExporter,
    progression: Option<Progression>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            exporter: MidiExporter::new(),
            progression: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Last successfully generated progression
    pub fn progression(&self) -> Option<&Progression> {
        self.progression.as_ref()
    }

    /// Displayed progression text ("Cmaj - Gmaj - Amin - Fmaj")
    pub fn display(&self) -> Option<String> {
        self.progression.as_ref().map(|p| p.to_string())
    }

    /// Run the whole pipeline for a request.
    ///
    /// Nothing is recorded unless every stage, serialization included,
    /// succeeds.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        input: &str,
        rng: &mut R,
    ) -> Result<Generation, GenerateError> {
        let generation = self.run(input, rng).map_err(|err| {
            warn!(input, %err, "generation rejected");
            err
        })?;
        self.progression = Some(generation.progression.clone());
        Ok(generation)
    }

    fn run<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> Result<Generation, GenerateError> {
        let request = ScaleRequest::parse(input)?;
        let key = request.resolve_key()?;
        let pool = ChordPool::from_scale(key.scale())
            .ok_or_else(|| GenerateError::TheoryResolution(request.root.clone()))?;
        debug!(%key, chords = pool.len(), "resolved chord pool");

        let progression = select_progression(&pool, rng);
        info!(%key, template = %progression.template(), %progression, "selected progression");

        let melody = MelodyGenerator::new(self.settings.melody.clone()).generate(
            &key,
            self.settings.melody.bars,
            rng,
        );

        let track = TrackAssembler::new(self.settings.chords.clone(), self.settings.instrument)
            .assemble(&progression, &melody, rng);
        let bytes = self.exporter.export_to_bytes(&track)?;
        let filename = progression_filename(progression.chords());

        Ok(Generation {
            key,
            pool,
            progression,
            melody,
            track,
            filename,
            bytes,
        })
    }
}
