//! Score — chord tables, the progression, and tempo arithmetic.
//!
//! The score is fixed at compile time. It is still validated once at
//! construction so that every chord the progression names is known to both
//! the pad and the bass layer before any audio is rendered.

use std::collections::BTreeMap;

use crate::error::{Result, SynthError};

// ── Built-in data ───────────────────────────────────────────

/// Pad partials (Hz) for each chord of the lofi loop.
const LOFI_PARTIALS: &[(&str, &[f64])] = &[
    ("C", &[261.63, 329.63, 392.00]),
    ("C7", &[261.63, 329.63, 392.00, 466.16]),
    ("Dm", &[293.66, 349.23, 440.00]),
    ("Am", &[220.00, 261.63, 329.63, 440.00]),
    ("Am7", &[220.00, 261.63, 329.63, 392.00]),
    ("Bb", &[233.08, 293.66, 349.23]),
    ("F", &[174.61, 220.00, 261.63, 349.23]),
];

/// Bass root (Hz) for each chord.
const LOFI_BASS_ROOTS: &[(&str, f64)] = &[
    ("C", 130.81),
    ("C7", 130.81),
    ("Dm", 146.83),
    ("Am", 110.00),
    ("Am7", 110.00),
    ("Bb", 116.54),
    ("F", 87.31),
];

/// (chord, beats) — 32 beats, eight bars of 4/4.
const LOFI_PROGRESSION: &[(&str, u32)] = &[
    ("F", 4),
    ("C", 2),
    ("C7", 2),
    ("Dm", 4),
    ("Am", 2),
    ("Am7", 2),
    ("Bb", 4),
    ("F", 4),
    ("C", 4),
    ("F", 4),
];

// ── Chords ──────────────────────────────────────────────────

/// One chord: the partials voiced by the pad plus the root played by the bass.
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    partials: Vec<f64>,
    bass_root: f64,
}

impl Chord {
    pub fn new(partials: Vec<f64>, bass_root: f64) -> Self {
        Chord { partials, bass_root }
    }

    pub fn partials(&self) -> &[f64] {
        &self.partials
    }

    pub fn bass_root(&self) -> f64 {
        self.bass_root
    }
}

/// Typed lookup from chord name to [`Chord`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChordTable {
    chords: BTreeMap<String, Chord>,
}

impl ChordTable {
    pub fn new() -> Self {
        ChordTable::default()
    }

    /// Build a table from separate partial and bass-root maps.
    ///
    /// Both maps must name exactly the same chords; a name present in only
    /// one of them is reported as [`SynthError::UnknownChord`].
    pub fn from_maps(
        partials: &BTreeMap<&str, Vec<f64>>,
        bass_roots: &BTreeMap<&str, f64>,
    ) -> Result<Self> {
        if let Some(name) = bass_roots.keys().find(|n| !partials.contains_key(*n)) {
            return Err(SynthError::UnknownChord {
                name: name.to_string(),
            });
        }

        let mut table = ChordTable::new();
        for (name, freqs) in partials {
            let root = bass_roots
                .get(name)
                .copied()
                .ok_or_else(|| SynthError::UnknownChord {
                    name: name.to_string(),
                })?;
            table.insert(*name, Chord::new(freqs.clone(), root));
        }
        Ok(table)
    }

    /// The seven chords used by the lofi loop.
    pub fn lofi() -> Result<Self> {
        let partials: BTreeMap<&str, Vec<f64>> = LOFI_PARTIALS
            .iter()
            .map(|&(name, freqs)| (name, freqs.to_vec()))
            .collect();
        let roots: BTreeMap<&str, f64> = LOFI_BASS_ROOTS.iter().copied().collect();
        Self::from_maps(&partials, &roots)
    }

    pub fn insert(&mut self, name: impl Into<String>, chord: Chord) {
        self.chords.insert(name.into(), chord);
    }

    pub fn get(&self, name: &str) -> Result<&Chord> {
        self.chords.get(name).ok_or_else(|| SynthError::UnknownChord {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chords.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}

// ── Progression ─────────────────────────────────────────────

/// A chord held for a whole number of beats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionEntry {
    pub chord: String,
    pub beats: u32,
}

impl ProgressionEntry {
    pub fn new(chord: impl Into<String>, beats: u32) -> Self {
        ProgressionEntry {
            chord: chord.into(),
            beats,
        }
    }
}

/// A chord table together with a progression that only references chords
/// present in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    table: ChordTable,
    progression: Vec<ProgressionEntry>,
}

impl Score {
    /// Validate `progression` against `table`. Fails on the first entry
    /// whose chord is missing.
    pub fn new(table: ChordTable, progression: Vec<ProgressionEntry>) -> Result<Self> {
        if let Some(entry) = progression.iter().find(|e| !table.contains(&e.chord)) {
            return Err(SynthError::UnknownChord {
                name: entry.chord.clone(),
            });
        }
        Ok(Score { table, progression })
    }

    /// The built-in F – C – C7 – Dm – Am – Am7 – Bb – F – C – F loop.
    pub fn lofi() -> Result<Self> {
        let progression = LOFI_PROGRESSION
            .iter()
            .map(|&(chord, beats)| ProgressionEntry::new(chord, beats))
            .collect();
        Self::new(ChordTable::lofi()?, progression)
    }

    pub fn table(&self) -> &ChordTable {
        &self.table
    }

    pub fn progression(&self) -> &[ProgressionEntry] {
        &self.progression
    }

    /// Progression entries paired with their resolved chord.
    pub fn entries(&self) -> impl Iterator<Item = Result<(&ProgressionEntry, &Chord)>> {
        self.progression
            .iter()
            .map(|entry| self.table.get(&entry.chord).map(|chord| (entry, chord)))
    }

    pub fn total_beats(&self) -> u32 {
        self.progression.iter().map(|e| e.beats).sum()
    }
}

// ── Tempo ───────────────────────────────────────────────────

/// Tempo parameters; everything time-related is derived from these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    pub bpm: f64,
    pub beats_per_measure: u32,
}

impl Default for Tempo {
    fn default() -> Self {
        Self {
            bpm: 124.0,
            beats_per_measure: 4,
        }
    }
}

impl Tempo {
    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.bpm
    }

    pub fn seconds_per_measure(&self) -> f64 {
        self.beats_per_measure as f64 * self.seconds_per_beat()
    }

    /// Duration in seconds of `beats` beats.
    pub fn beats_to_seconds(&self, beats: u32) -> f64 {
        beats as f64 * self.seconds_per_beat()
    }
}
