//! Run configuration
//!
//! A run reads every file of an input directory and writes one export per
//! file into an output directory. Both directories live under a base
//! directory, by default the directory of the executable, so the converter
//! can be dropped next to a `CNABs` folder and double-clicked.

use crate::cli::{LayoutVersion, OutputMode};
use crate::io::csv_format::DEFAULT_DELIMITER;
use crate::io::decoder::{TextEncoding, DEFAULT_ENCODINGS};
use std::path::{Path, PathBuf};

/// Input directory name under the base directory
pub const INPUT_DIR_NAME: &str = "CNABs";

/// Output directory name under the base directory
pub const OUTPUT_DIR_NAME: &str = "Convertidos";

/// Everything a strategy needs to convert a directory of files
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub layout: LayoutVersion,
    pub mode: OutputMode,
    /// Decoding order; the first encoding that accepts a file wins
    pub encodings: Vec<TextEncoding>,
    /// CSV field separator
    pub delimiter: u8,
}

impl RunConfig {
    /// Default configuration rooted at `base`
    pub fn from_base_dir(base: &Path) -> Self {
        Self {
            input_dir: base.join(INPUT_DIR_NAME),
            output_dir: base.join(OUTPUT_DIR_NAME),
            layout: LayoutVersion::Uy3Aggregated,
            mode: OutputMode::Operations,
            encodings: DEFAULT_ENCODINGS.to_vec(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_dir() {
        let config = RunConfig::from_base_dir(Path::new("/opt/conversor"));

        assert_eq!(config.input_dir, PathBuf::from("/opt/conversor/CNABs"));
        assert_eq!(config.output_dir, PathBuf::from("/opt/conversor/Convertidos"));
        assert_eq!(config.layout, LayoutVersion::Uy3Aggregated);
        assert_eq!(config.mode, OutputMode::Operations);
        assert_eq!(config.encodings, DEFAULT_ENCODINGS.to_vec());
        assert_eq!(config.delimiter, b';');
    }
}
