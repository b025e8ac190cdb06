use std::fs::File;
use std::io::BufReader;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use log::trace;

use crate::prelude::Result;
use crate::walker::FlacMetadata;

/// A FLAC file on disk and the metadata read from it.
///
/// The file is only held open while [FlacFile::open] runs.
#[derive(Debug, Clone)]
pub struct FlacFile {
    path: PathBuf,
    file_size: u64,
    metadata: FlacMetadata,
}

impl FlacFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        trace!("Reading flac metadata: {:?}", path);

        let file = File::open(path)?;
        let file_size = file.metadata()?.len();
        let mut reader = BufReader::new(file);
        let metadata = FlacMetadata::from_reader(&mut reader)?;

        Ok(FlacFile {
            path: path.to_path_buf(),
            file_size,
            metadata,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the whole file in bytes, audio frames included.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn metadata(&self) -> &FlacMetadata {
        &self.metadata
    }

    pub fn into_metadata(self) -> FlacMetadata {
        self.metadata
    }
}

impl Deref for FlacFile {
    type Target = FlacMetadata;

    fn deref(&self) -> &Self::Target {
        &self.metadata
    }
}
