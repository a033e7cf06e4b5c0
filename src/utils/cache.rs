//! # File-Backed Result Cache
//!
//! Memoizes expensive computations as JSON files under a cache directory.
//! An entry is computed and written when its file is missing (or a refresh
//! is requested) and read back otherwise.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, ToolboxError};

/// Cache rooted at a directory; entries are addressed by relative path
#[derive(Clone, Debug)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        info!(dir = %dir.display(), "cache directory");
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute location of an entry
    pub fn path(&self, entry: impl AsRef<Path>) -> PathBuf {
        self.dir.join(entry)
    }

    /// Return the cached value of `entry`, computing and storing it with `f`
    /// when missing or when `refresh` is set.
    pub fn get_or_compute<T, F>(&self, entry: impl AsRef<Path>, refresh: bool, f: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        self.try_get_or_compute(entry, refresh, || Ok::<T, ToolboxError>(f()))
    }

    /// Like [`Cache::get_or_compute`] for fallible computations.
    ///
    /// Nothing is written when `f` fails.
    pub fn try_get_or_compute<T, E, F>(&self, entry: impl AsRef<Path>, refresh: bool, f: F) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<ToolboxError>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let path = self.path(entry);
        check_format(&path)?;

        if path.is_file() && !refresh {
            let value = read_json(&path)?;
            info!(path = %path.display(), "loaded from cache");
            return Ok(value);
        }

        let value = f()?;
        write_json(&path, &value)?;
        info!(path = %path.display(), "saved to cache");
        Ok(value)
    }

    /// Delete an entry; returns whether it existed
    pub fn invalidate(&self, entry: impl AsRef<Path>) -> Result<bool> {
        let path = self.path(entry);
        if path.is_file() {
            fs::remove_file(&path)?;
            debug!(path = %path.display(), "cache entry removed");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

fn check_format(path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(()),
        Some(other) => Err(ToolboxError::unsupported_format(other)),
        None => Err(ToolboxError::unsupported_format("<none>")),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
