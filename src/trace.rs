use std::{
    fs::{File, create_dir_all},
    io,
    path::PathBuf,
};

use log::debug;

use crate::spiral::Visit;

/// Appends each visited cell to a CSV file, one row per value.
pub struct TraceRecorder {
    path: PathBuf,
    writer: csv::Writer<File>,
    records: usize,
}

impl TraceRecorder {
    pub fn create(path: impl Into<PathBuf>) -> Result<TraceRecorder, io::Error> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            create_dir_all(parent)?;
        }
        let writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_path(&path)?;
        Ok(TraceRecorder {
            path,
            writer,
            records: 0,
        })
    }

    pub fn record(&mut self, visit: &Visit) -> Result<(), io::Error> {
        self.writer.serialize(visit)?;
        self.records += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize, io::Error> {
        self.writer.flush()?;
        debug!("wrote {} visits to {}", self.records, self.path.display());
        Ok(self.records)
    }
}
