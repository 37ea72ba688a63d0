//! Output file writing for one pack directory.
//!
//! Directories are created explicitly; writing a file whose parent does not
//! exist is an error rather than an implicit `mkdir -p`. Files several
//! generators contribute to are collected in memory and written once by
//! [`PackWriter::flush`].

use crate::error::{PackError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes files below a pack root.
#[derive(Debug)]
pub struct PackWriter {
    root: PathBuf,
    shared: BTreeMap<PathBuf, String>,
    written: usize,
}

impl PackWriter {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            shared: BTreeMap::new(),
            written: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a pack-relative path.
    pub fn path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.root.join(relative)
    }

    /// Number of files written so far, including flushed shared files.
    pub fn files_written(&self) -> usize {
        self.written
    }

    /// Create the pack root directory.
    pub fn create_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| PackError::io(&self.root, e))
    }

    /// Create a directory (and its parents) below the pack root.
    pub fn create_dir<P: AsRef<Path>>(&self, relative: P) -> Result<()> {
        let path = self.path(relative);
        fs::create_dir_all(&path).map_err(|e| PackError::io(&path, e))
    }

    fn check_parent(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if parent.is_dir() => Ok(()),
            _ => Err(PackError::MissingDirectory(path.to_path_buf())),
        }
    }

    /// Write a file, replacing any previous contents.
    pub fn write<P: AsRef<Path>>(&mut self, relative: P, contents: &str) -> Result<()> {
        let path = self.path(relative);
        Self::check_parent(&path)?;
        fs::write(&path, contents).map_err(|e| PackError::io(&path, e))?;
        self.written += 1;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Serialize a value as four-space indented JSON and write it.
    pub fn write_json<P: AsRef<Path>, T: Serialize>(&mut self, relative: P, value: &T) -> Result<()> {
        let json = super::to_pretty_json(value)?;
        self.write(relative, &json)
    }

    /// Copy a binary asset, replacing any previous file.
    pub fn copy<S: AsRef<Path>, P: AsRef<Path>>(&mut self, source: S, relative: P) -> Result<()> {
        let source = source.as_ref();
        let path = self.path(relative);
        Self::check_parent(&path)?;
        fs::copy(source, &path).map_err(|e| PackError::io(source, e))?;
        self.written += 1;
        log::debug!("Copied {} -> {}", source.display(), path.display());
        Ok(())
    }

    /// Copy a binary asset unless the destination already exists.
    ///
    /// Returns whether the file was copied.
    pub fn copy_if_absent<S: AsRef<Path>, P: AsRef<Path>>(
        &mut self,
        source: S,
        relative: P,
    ) -> Result<bool> {
        let path = self.path(relative.as_ref());
        if path.exists() {
            log::warn!("Skipping {}: destination already exists", path.display());
            return Ok(false);
        }
        self.copy(source, relative)?;
        Ok(true)
    }

    /// Add text to a shared file. Nothing touches the disk until [`flush`](Self::flush).
    pub fn append<P: AsRef<Path>>(&mut self, relative: P, contents: &str) {
        self.shared
            .entry(relative.as_ref().to_path_buf())
            .or_default()
            .push_str(contents);
    }

    /// Write every shared file exactly once.
    pub fn flush(&mut self) -> Result<()> {
        let shared = std::mem::take(&mut self.shared);
        for (relative, contents) in shared {
            self.write(&relative, &contents)?;
        }
        Ok(())
    }
}
