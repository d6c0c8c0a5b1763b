//! Output sink: writes a finished blob to its destination.
//!
//! Whether an existing file may be replaced is decided by the caller
//! through an [`OverwritePolicy`]. The sink asks at most once and never
//! prompts on its own.

use crate::encoder::Blob;
use crate::error::{Result, ScriptError};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Callback type for overwrite confirmation: `(existing_path) -> allowed`.
type ConfirmCallback<'a> = Box<dyn FnMut(&Path) -> bool + 'a>;

/// What to do when the destination already exists.
pub enum OverwritePolicy<'a> {
    /// Replace without asking.
    Always,
    /// Refuse with [`ScriptError::OutputExists`].
    Never,
    /// Ask the callback.
    Ask(ConfirmCallback<'a>),
}

impl<'a> OverwritePolicy<'a> {
    pub fn ask(confirm: impl FnMut(&Path) -> bool + 'a) -> Self {
        OverwritePolicy::Ask(Box::new(confirm))
    }

    /// Decide for `path`. Destinations that do not exist are always allowed.
    pub fn permits(&mut self, path: &Path) -> bool {
        if !path.exists() {
            return true;
        }
        match self {
            OverwritePolicy::Always => true,
            OverwritePolicy::Never => false,
            OverwritePolicy::Ask(confirm) => confirm(path),
        }
    }

    /// Fail with [`ScriptError::OutputExists`] unless writing is permitted.
    pub fn check(&mut self, path: &Path) -> Result<()> {
        if self.permits(path) {
            Ok(())
        } else {
            Err(ScriptError::OutputExists(path.to_path_buf()))
        }
    }
}

impl fmt::Debug for OverwritePolicy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverwritePolicy::Always => f.write_str("Always"),
            OverwritePolicy::Never => f.write_str("Never"),
            OverwritePolicy::Ask(_) => f.write_str("Ask(..)"),
        }
    }
}

/// Write `blob` to `path` in a single write.
///
/// The overwrite policy is consulted first; a refusal leaves the
/// destination untouched. Missing parent directories are created.
pub fn write_blob(blob: &Blob, path: &Path, policy: &mut OverwritePolicy<'_>) -> Result<()> {
    policy.check(path)?;
    write_unchecked(blob, path)
}

/// Write without consulting any overwrite policy.
pub(crate) fn write_unchecked(blob: &Blob, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ScriptError::io(parent, e))?;
    }

    fs::write(path, blob.as_bytes()).map_err(|e| ScriptError::io(path, e))?;
    debug!(path = %path.display(), bytes = blob.len(), "wrote blob");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::table::load;
    use tempfile::tempdir;

    fn sample_blob() -> Blob {
        encode(&load(b"1,a,b,c,d,e\n").unwrap()).unwrap()
    }

    #[test]
    fn test_write_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.sdf");
        let blob = sample_blob();

        write_blob(&blob, &path, &mut OverwritePolicy::Never).unwrap();
        assert_eq!(fs::read(&path).unwrap(), blob.as_bytes());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.sdf");
        write_blob(&sample_blob(), &path, &mut OverwritePolicy::Always).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_never_leaves_existing_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.sdf");
        fs::write(&path, b"original").unwrap();

        let err = write_blob(&sample_blob(), &path, &mut OverwritePolicy::Never).unwrap_err();
        assert!(matches!(err, ScriptError::OutputExists(_)));
        assert_eq!(fs::read(&path).unwrap(), b"original");
    }

    #[test]
    fn test_always_replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.sdf");
        fs::write(&path, b"original").unwrap();

        let blob = sample_blob();
        write_blob(&blob, &path, &mut OverwritePolicy::Always).unwrap();
        assert_eq!(fs::read(&path).unwrap(), blob.as_bytes());
    }

    #[test]
    fn test_ask_consulted_once_only_when_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.sdf");
        let mut calls = 0;

        {
            let mut policy = OverwritePolicy::ask(|_| {
                calls += 1;
                false
            });
            write_blob(&sample_blob(), &path, &mut policy).unwrap();
        }
        assert_eq!(calls, 0);

        {
            let mut policy = OverwritePolicy::ask(|p| {
                calls += 1;
                p.ends_with("out.sdf")
            });
            write_blob(&sample_blob(), &path, &mut policy).unwrap();
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_ask_declined() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.sdf");
        fs::write(&path, b"keep").unwrap();

        let mut policy = OverwritePolicy::ask(|_| false);
        assert!(write_blob(&sample_blob(), &path, &mut policy).is_err());
        assert_eq!(fs::read(&path).unwrap(), b"keep");
    }

    #[test]
    fn test_write_under_regular_file_is_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        // A regular file cannot act as a parent directory.
        let path = blocker.join("out.sdf");

        let err = write_blob(&sample_blob(), &path, &mut OverwritePolicy::Always).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
    }
}
