use std::{
    fs::File,
    io::{self, BufReader, BufWriter, ErrorKind, Write},
    path::Path,
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::util::ResultExtToIoError;

/// Number of cells to fill and side length of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralConfig {
    pub length: usize,
    pub matrix_size: usize,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        SpiralConfig {
            length: 81,
            matrix_size: 9,
        }
    }
}

impl SpiralConfig {
    pub fn new(length: usize, matrix_size: usize) -> SpiralConfig {
        SpiralConfig {
            length,
            matrix_size,
        }
    }

    /// Loads the config at `path`. A missing file is created with the defaults; an unreadable
    /// one is an error rather than being overwritten.
    pub fn load_or_create(path: &Path) -> Result<SpiralConfig, io::Error> {
        match File::open(path) {
            Ok(file) => {
                debug!("loading config from {}", path.display());
                serde_json::from_reader(BufReader::new(file)).to_ioerror()
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!("No config at {}, writing defaults", path.display());
                let config = SpiralConfig::default();
                config.save(path)?;
                Ok(config)
            }
            Err(err) => Err(err),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), io::Error> {
        debug!("saving config to {}", path.display());
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self).to_ioerror()?;
        writer.flush()
    }

    /// Replaces fields with any values given explicitly.
    pub fn with_overrides(
        self,
        length: Option<usize>,
        matrix_size: Option<usize>,
    ) -> SpiralConfig {
        SpiralConfig {
            length: length.unwrap_or(self.length),
            matrix_size: matrix_size.unwrap_or(self.matrix_size),
        }
    }
}
