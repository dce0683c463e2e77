// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Standard MIDI file export.
//!
//! Writes an assembled [`Track`] as a Type 0 file through `midly`. Each
//! note event becomes note-on/note-off pairs at absolute ticks which are
//! then sorted and delta-encoded.

use midly::num::{u15, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use tracing::debug;

use super::track::{Track, TrackEvent as AssembledEvent};
use super::ExportError;
use crate::generators::TICKS_PER_QUARTER;
use crate::music::scale::Pitch;

/// Largest delta a variable-length quantity can carry
const MAX_DELTA: u64 = (1 << 28) - 1;

/// Sort rank for events sharing a tick: program changes first, then
/// releases, then new notes.
fn order_key(kind: &TrackEventKind<'_>) -> u8 {
    match kind {
        TrackEventKind::Midi {
            message: MidiMessage::ProgramChange { .. },
            ..
        } => 0,
        TrackEventKind::Midi {
            message: MidiMessage::NoteOff { .. },
            ..
        } => 1,
        _ => 2,
    }
}

/// MIDI file exporter
#[derive(Debug, Clone)]
pub struct MidiExporter {
    /// PPQN (ticks per quarter note) written to the header
    ppqn: u16,
}

impl MidiExporter {
    /// Create a new exporter at the generator resolution
    pub fn new() -> Self {
        Self {
            ppqn: TICKS_PER_QUARTER as u16,
        }
    }

    /// Build the in-memory SMF
    pub fn to_smf(&self, track: &Track) -> Result<Smf<'static>, ExportError> {
        if track.channel > 15 {
            return Err(ExportError::InvalidChannel(track.channel));
        }
        let channel = u4::new(track.channel);

        let mut timed: Vec<(u64, TrackEventKind<'static>)> = Vec::new();

        for event in track.events() {
            match event {
                AssembledEvent::ProgramChange { instrument } => {
                    if !(1..=128).contains(instrument) {
                        return Err(ExportError::InvalidInstrument(*instrument));
                    }
                    timed.push((
                        0,
                        TrackEventKind::Midi {
                            channel,
                            message: MidiMessage::ProgramChange {
                                program: u7::new(instrument - 1),
                            },
                        },
                    ));
                }
                AssembledEvent::Note(note) => {
                    if note.velocity > 127 {
                        return Err(ExportError::VelocityOutOfRange(note.velocity));
                    }
                    // Humanized starts can fall before the file begins
                    let start = note.start_tick.max(0) as u64;
                    let end = note.end_tick().max(0) as u64;

                    // Same-key notes may overlap (melody slots are closer than
                    // an eighth). Each keeps its own NoteOff at start + length,
                    // so the earlier release ends the later note.

                    for &pitch in &note.pitches {
                        let key = midi_key(pitch)?;
                        timed.push((
                            start,
                            TrackEventKind::Midi {
                                channel,
                                message: MidiMessage::NoteOn {
                                    key,
                                    vel: u7::new(note.velocity),
                                },
                            },
                        ));
                        timed.push((
                            end,
                            TrackEventKind::Midi {
                                channel,
                                message: MidiMessage::NoteOff {
                                    key,
                                    vel: u7::new(0),
                                },
                            },
                        ));
                    }
                }
            }
        }

        // Stable: equal ticks and ranks keep insertion order
        timed.sort_by(|(ta, ka), (tb, kb)| ta.cmp(tb).then_with(|| order_key(ka).cmp(&order_key(kb))));

        let mut events: Vec<TrackEvent<'static>> = Vec::with_capacity(timed.len() + 1);
        let mut last_tick = 0u64;
        for (tick, kind) in timed {
            let delta = tick - last_tick;
            if delta > MAX_DELTA {
                return Err(ExportError::TickOverflow(tick));
            }
            last_tick = tick;
            events.push(TrackEvent {
                delta: u28::new(delta as u32),
                kind,
            });
        }
        events.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });

        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(self.ppqn)),
        ));
        smf.tracks.push(events);
        Ok(smf)
    }

    /// Encode the track as SMF bytes
    pub fn export_to_bytes(&self, track: &Track) -> Result<Vec<u8>, ExportError> {
        let smf = self.to_smf(track)?;
        let mut buffer = Vec::new();
        smf.write_std(&mut buffer)?;
        debug!(bytes = buffer.len(), events = smf.tracks[0].len(), "encoded MIDI track");
        Ok(buffer)
    }
}

impl Default for MidiExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn midi_key(pitch: Pitch) -> Result<u7, ExportError> {
    let midi = pitch.midi();
    if !(0..=127).contains(&midi) {
        return Err(ExportError::PitchOutOfRange { pitch, midi });
    }
    Ok(u7::new(midi as u8))
}
