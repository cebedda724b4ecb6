//! Sequencer — walks the progression and lays down the chord and bass tracks.

use crate::error::Result;
use crate::score::{Score, Tempo};

use super::oscillator::{generate_bass, generate_chord, segment_len};

/// The two pitched tracks, always of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracks {
    pub chords: Vec<f64>,
    pub bass: Vec<f64>,
}

impl Tracks {
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}

/// Renders a [`Score`] at a fixed tempo and sample rate.
#[derive(Debug, Clone, Copy)]
pub struct Sequencer<'a> {
    score: &'a Score,
    tempo: Tempo,
    sample_rate: f64,
}

impl<'a> Sequencer<'a> {
    pub fn new(score: &'a Score, tempo: Tempo, sample_rate: f64) -> Self {
        Sequencer {
            score,
            tempo,
            sample_rate,
        }
    }

    /// Sample count of each progression entry, in order.
    pub fn segment_lengths(&self) -> Vec<usize> {
        self.score
            .progression()
            .iter()
            .map(|e| segment_len(self.tempo.beats_to_seconds(e.beats), self.sample_rate))
            .collect()
    }

    /// Total length of the rendered tracks in samples.
    pub fn total_len(&self) -> usize {
        self.segment_lengths().iter().sum()
    }

    /// One chord pad and one bass note per entry, concatenated in order.
    pub fn render(&self) -> Result<Tracks> {
        let total = self.total_len();
        let mut chords = Vec::with_capacity(total);
        let mut bass = Vec::with_capacity(total);

        for entry in self.score.entries() {
            let (entry, chord) = entry?;
            let duration = self.tempo.beats_to_seconds(entry.beats);
            let pad = generate_chord(chord.partials(), duration, self.sample_rate);
            let root = generate_bass(chord.bass_root(), duration, self.sample_rate);
            debug_assert_eq!(pad.len(), root.len());
            tracing::debug!(
                chord = %entry.chord,
                beats = entry.beats,
                samples = pad.len(),
                "rendered segment"
            );
            chords.extend_from_slice(&pad);
            bass.extend_from_slice(&root);
        }

        Ok(Tracks { chords, bass })
    }
}
