//! Output destinations.
//!
//! Exporters never touch the filesystem directly; they ask an [`IoSystem`]
//! for a writer per named destination. The writer is dropped (and so
//! released) when the exporter is done with it, on success or failure.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Something that can open named destinations for writing.
pub trait IoSystem {
    /// Open `path` for writing, truncating anything already there.
    fn open_write(&mut self, path: &str) -> io::Result<Box<dyn Write + '_>>;
}

/// Writes destinations as files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystem;

impl FileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl IoSystem for FileSystem {
    fn open_write(&mut self, path: &str) -> io::Result<Box<dyn Write + '_>> {
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Keeps written destinations in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryIoSystem {
    files: BTreeMap<String, Vec<u8>>,
    refused: BTreeSet<String>,
}

impl MemoryIoSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every attempt to open `path` fail.
    pub fn refuse(mut self, path: impl Into<String>) -> Self {
        self.refused.insert(path.into());
        self
    }

    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Contents of `path`, if it was written and is valid UTF-8.
    pub fn file_str(&self, path: &str) -> Option<&str> {
        self.file(path).and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl IoSystem for MemoryIoSystem {
    fn open_write(&mut self, path: &str) -> io::Result<Box<dyn Write + '_>> {
        if self.refused.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not writable", path),
            ));
        }
        let buf = self.files.entry(path.to_string()).or_default();
        buf.clear();
        Ok(Box::new(buf))
    }
}
