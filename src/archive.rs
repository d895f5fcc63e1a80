#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use zip::{ZipArchive, ZipWriter, result::ZipError, write::SimpleFileOptions};

use crate::error::{GradingError, Result};

/// An OpenDocument (zip) container held open for reading.
pub struct Archive {
    /// Where the container was opened from
    path: PathBuf,
    /// The open zip reader
    zip:  ZipArchive<File>,
}

impl Archive {
    /// Opens the container at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let archive_error = |reason: String| GradingError::Archive {
            path: path.display().to_string(),
            reason,
        };

        let file = File::open(&path).map_err(|e| archive_error(e.to_string()))?;
        let zip = ZipArchive::new(file).map_err(|e| archive_error(e.to_string()))?;

        tracing::debug!("Opened {} with {} entries", path.display(), zip.len());
        Ok(Self { path, zip })
    }

    /// Path the container was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of all members, in archive order.
    pub fn entry_names(&self) -> Vec<String> {
        self.zip.file_names().map(String::from).collect()
    }

    /// Returns the uncompressed bytes of the member called `name`.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut entry = self.zip.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => GradingError::EntryNotFound(name.to_string()),
            e => GradingError::Archive {
                path:   self.path.display().to_string(),
                reason: e.to_string(),
            },
        })?;

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| GradingError::Archive {
                path:   self.path.display().to_string(),
                reason: format!("could not read `{name}`: {e}"),
            })?;
        Ok(bytes)
    }

    /// Writes a copy of this container to `output`, with the member `replaced`
    /// swapped for `contents`.
    ///
    /// Every other member is copied with its compressed bytes and metadata
    /// untouched. The copy is assembled in a temporary file next to `output`,
    /// given the input's file permissions, and only moved into place once
    /// complete.
    pub fn rewrite(&mut self, output: &Path, replaced: &str, contents: &[u8]) -> Result<()> {
        let write_error = |reason: String| GradingError::Write {
            path: output.display().to_string(),
            reason,
        };

        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staging = NamedTempFile::new_in(dir).map_err(|e| write_error(e.to_string()))?;

        {
            let mut writer = ZipWriter::new(staging.as_file_mut());
            let mut found = false;

            for index in 0..self.zip.len() {
                let entry = self
                    .zip
                    .by_index_raw(index)
                    .map_err(|e| write_error(e.to_string()))?;

                if entry.name() != replaced {
                    tracing::debug!("Copying {} unchanged", entry.name());
                    writer
                        .raw_copy_file(entry)
                        .map_err(|e| write_error(e.to_string()))?;
                    continue;
                }

                found = true;
                let mut options = SimpleFileOptions::default()
                    .compression_method(entry.compression())
                    .last_modified_time(entry.last_modified().unwrap_or_default());
                if let Some(mode) = entry.unix_mode() {
                    options = options.unix_permissions(mode);
                }
                let name = entry.name().to_string();
                drop(entry);

                tracing::debug!("Replacing {name} ({} bytes)", contents.len());
                writer
                    .start_file(name, options)
                    .map_err(|e| write_error(e.to_string()))?;
                writer
                    .write_all(contents)
                    .map_err(|e| write_error(e.to_string()))?;
            }

            if !found {
                return Err(GradingError::EntryNotFound(replaced.to_string()));
            }

            writer.finish().map_err(|e| write_error(e.to_string()))?;
        }

        let permissions = std::fs::metadata(&self.path)
            .map_err(|e| write_error(format!("could not read permissions of the input: {e}")))?
            .permissions();
        staging
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| write_error(e.to_string()))?;

        staging
            .persist(output)
            .map_err(|e| write_error(e.error.to_string()))?;
        Ok(())
    }
}
