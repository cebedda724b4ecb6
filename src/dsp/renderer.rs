//! WAV renderer — encodes mono 16-bit PCM and writes it to disk.

use std::io::{Cursor, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

/// Mono, 16-bit signed integer PCM at `sample_rate`.
pub fn wav_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Encode `samples` as a complete WAV file in memory.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, wav_spec(sample_rate))?;
        let mut pcm = writer.get_i16_writer(samples.len() as u32);
        for &s in samples {
            pcm.write_sample(s);
        }
        pcm.flush()?;
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Write `samples` to `path`, replacing any existing file.
///
/// The encoded file goes to a temporary file in the target directory and is
/// persisted over `path` only once complete, so a failure never leaves a
/// truncated WAV behind.
pub fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) -> Result<()> {
    let bytes = encode_wav(samples, sample_rate)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote wav");
    Ok(())
}
