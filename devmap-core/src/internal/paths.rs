use std::{
    ops::Deref,
    sync::atomic::{AtomicU32, Ordering},
};

use dashmap::DashMap;
use devmap_types::{PathFormatError, ProfilePath};
use regex::Regex;

use once_cell::sync::Lazy;

static PATH_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(/(\.*[a-z0-9-_]+\.*)+)+$"#).expect("path format regex is valid")
});

/**
 * Interns profile path strings so profile identity is a cheap copyable handle
 */
#[derive(Debug, Default)]
pub struct PathManager {
    ids: DashMap<String, ProfilePath>,
    strings: DashMap<ProfilePath, String>,
    next: AtomicU32,
}

impl PathManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_path(&self, path_string: &str) -> Result<ProfilePath, PathFormatError> {
        if let Some(path) = self.ids.get(path_string) {
            return Ok(*path.deref());
        }

        if PATH_FORMAT.is_match(path_string) {
            // the entry lock is held while the id is taken, a racing intern of the same string reuses it
            let path = *self
                .ids
                .entry(path_string.to_owned())
                .or_insert_with(|| ProfilePath(self.next.fetch_add(1, Ordering::Relaxed)));
            self.strings.entry(path).or_insert_with(|| path_string.to_owned());
            Ok(path)
        } else {
            Err(PathFormatError)
        }
    }

    pub fn get_path_string(&self, path: ProfilePath) -> Option<String> {
        self.strings.get(&path).map(|inner| inner.clone())
    }
}
