//! Output location — the rendered loop lands on the user's desktop.

use std::path::PathBuf;

use directories::{BaseDirs, UserDirs};

use crate::error::{Result, SynthError};

/// File name of the rendered loop.
pub const OUTPUT_FILE_NAME: &str = "progression_lofi.wav";

/// The platform desktop directory, or `<home>/Desktop` when the platform
/// does not define one.
pub fn desktop_dir() -> Result<PathBuf> {
    if let Some(desktop) = UserDirs::new().and_then(|u| u.desktop_dir().map(|d| d.to_path_buf())) {
        return Ok(desktop);
    }
    BaseDirs::new()
        .map(|b| b.home_dir().join("Desktop"))
        .ok_or(SynthError::NoOutputDir)
}

/// `<desktop>/progression_lofi.wav`.
pub fn default_output_path() -> Result<PathBuf> {
    Ok(desktop_dir()?.join(OUTPUT_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_ends_with_file_name() {
        // Headless CI may have no home directory at all.
        if let Ok(path) = default_output_path() {
            assert_eq!(path.file_name().unwrap(), OUTPUT_FILE_NAME);
            assert!(path.parent().is_some());
        }
    }
}
