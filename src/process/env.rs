/*!
 * Environment Snapshot
 *
 * Owned `KEY=VALUE` C strings captured from the bridge's environment, handed
 * to the tool as its `envp`.
 */

use std::ffi::{CString, OsStr, OsString};
use std::os::unix::ffi::OsStrExt;

/// Environment variable the search path is installed in
pub const PATH_VAR: &str = "PATH";

/// Copy of an environment, independent of later changes to the process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    entries: Vec<CString>,
}

impl EnvironmentSnapshot {
    /// Capture the current process environment
    pub fn capture() -> Self {
        Self::from_pairs(std::env::vars_os())
    }

    /// Build from key/value pairs; pairs containing NUL bytes are dropped
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        let entries = pairs
            .into_iter()
            .filter_map(|(key, value)| {
                let key = key.as_ref().as_bytes();
                let value = value.as_ref().as_bytes();
                let mut entry = Vec::with_capacity(key.len() + 1 + value.len());
                entry.extend_from_slice(key);
                entry.push(b'=');
                entry.extend_from_slice(value);
                CString::new(entry).ok()
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CString] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of `key`, first match wins
    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.entries.iter().find_map(|entry| {
            let bytes = entry.as_bytes();
            let rest = bytes.strip_prefix(key.as_bytes())?;
            let value = rest.strip_prefix(b"=")?;
            Some(OsStr::from_bytes(value))
        })
    }
}

/// Sets `PATH` for the lifetime of the guard, restoring the previous value
/// on drop
///
/// The bridge only drops it when exec failed; on success the process image
/// is gone.
pub struct PathOverride {
    previous: Option<OsString>,
}

impl PathOverride {
    pub fn install(search_path: &OsStr) -> Self {
        let previous = std::env::var_os(PATH_VAR);
        std::env::set_var(PATH_VAR, search_path);
        Self { previous }
    }
}

impl Drop for PathOverride {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => std::env::set_var(PATH_VAR, value),
            None => std::env::remove_var(PATH_VAR),
        }
    }
}
