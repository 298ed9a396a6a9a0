//! Whole-file reads and crash-safe writes.

use crate::error::{Error, Result};
use getrandom::fill;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A single file on disk, read and written in one piece.
#[derive(Clone, Debug)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Creates a new Storage instance with the given path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns `true` if the path names an existing regular file.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Loads the entire file into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the path is not a regular file, or the
    /// I/O error if reading fails.
    pub fn load(&self) -> Result<Vec<u8>> {
        if !self.exists() {
            return Err(Error::NotFound(self.path.clone()));
        }
        Ok(fs::read(&self.path)?)
    }

    /// Saves data to the file using atomic write.
    ///
    /// This method ensures crash-safety by:
    /// 1. Writing data to a temporary file with random name
    /// 2. Syncing the temporary file to disk
    /// 3. Atomically replacing the old file with the new one
    /// 4. Syncing the parent directory to ensure the rename is persisted
    ///
    /// If anything fails, the target is either untouched or fully written,
    /// never a partial write.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.random_tmp_path()?;

        // fails if the name is taken
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)?;

        if let Err(e) = tmp_file.write_all(data).and_then(|_| tmp_file.sync_all()) {
            drop(tmp_file);
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        drop(tmp_file);

        if let Err(e) = self.atomic_replace(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        self.sync_parent()
    }

    /// Returns the path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Generates a unique temporary file path in the same directory.
    ///
    /// Format: `.<randomhex>.tmp`. The target name is not embedded, so a
    /// target close to the file system's name limit still gets a legal
    /// temporary name.
    fn random_tmp_path(&self) -> Result<PathBuf> {
        let mut buf = [0u8; 8]; // 64 bit entropy
        fill(&mut buf).map_err(|_| Error::Random)?;

        let rand_string = buf.iter().map(|b| format!("{:02x}", b)).collect::<String>();

        if self.path.file_name().is_none() {
            return Err(Error::InvalidFileName(self.path.clone()));
        }

        Ok(self.path.with_file_name(format!(".{}.tmp", rand_string)))
    }

    /// Atomically replaces the target file with the temporary file.
    ///
    /// Uses Windows `ReplaceFileW` with `REPLACEFILE_WRITE_THROUGH` when the
    /// target exists. `ReplaceFileW` refuses a missing target, so a first
    /// write falls back to a plain rename.
    #[cfg(target_os = "windows")]
    fn atomic_replace(&self, tmp_path: &Path) -> Result<()> {
        use std::ffi::OsStr;
        use std::os::windows::ffi::OsStrExt;
        use windows_sys::Win32::Storage::FileSystem::{REPLACEFILE_WRITE_THROUGH, ReplaceFileW};

        if !self.path.exists() {
            fs::rename(tmp_path, &self.path)?;
            return Ok(());
        }

        fn to_wide(s: &OsStr) -> Vec<u16> {
            s.encode_wide().chain(std::iter::once(0)).collect()
        }

        let target_w = to_wide(self.path.as_os_str());
        let tmp_w = to_wide(tmp_path.as_os_str());

        // SAFETY:
        // - Strings are valid UTF-16 and null-terminated
        // - Pointers remain valid during the call
        // - Windows does not retain the pointers after return
        let result = unsafe {
            ReplaceFileW(
                target_w.as_ptr(),
                tmp_w.as_ptr(),
                std::ptr::null(),
                REPLACEFILE_WRITE_THROUGH,
                std::ptr::null(),
                std::ptr::null(),
            )
        };

        if result == 0 {
            return Err(std::io::Error::last_os_error().into());
        }

        Ok(())
    }

    /// Flushes the directory entry so the rename survives a crash.
    #[cfg(not(target_os = "windows"))]
    fn sync_parent(&self) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::File::open(parent)?.sync_all()?;
        Ok(())
    }

    #[cfg(target_os = "windows")]
    fn sync_parent(&self) -> Result<()> {
        Ok(())
    }

    /// Atomically replaces the target file with the temporary file.
    ///
    /// On Unix, `rename()` is atomic when both paths are on the same filesystem.
    #[cfg(not(target_os = "windows"))]
    fn atomic_replace(&self, tmp_path: &Path) -> Result<()> {
        fs::rename(tmp_path, &self.path)?;
        Ok(())
    }
}
