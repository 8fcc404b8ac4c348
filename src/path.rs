//! Logical path normalization
//!
//! Every file is keyed by a canonical, slash-separated, relative path. The same
//! cleaning rules are used when records are generated and when the runtime
//! filesystem answers lookups, so a query resolves exactly when it names a
//! generated record.

use crate::error::PathError;
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

/// Split a raw path into cleaned segments.
///
/// Platform separators become `/`, empty and `.` segments are dropped and `..`
/// removes the previous segment. A leading `/` roots the path; cleaning never
/// climbs above that root.
fn clean_segments(raw: &str) -> Result<Vec<String>, PathError> {
    let slashed = to_slash(raw);
    let mut segments: Vec<String> = Vec::new();
    for segment in slashed.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(PathError::invalid(raw, "escapes the root"));
                }
            }
            name => segments.push(name.nfc().collect()),
        }
    }
    Ok(segments)
}

fn to_slash(raw: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        raw.to_string()
    } else {
        raw.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Canonicalize `raw` and remove its first `strip` segments.
///
/// Fails when the path escapes its root, when stripping would consume every
/// segment, or when nothing is left after cleaning.
pub fn normalize_path(raw: &str, strip: usize) -> Result<String, PathError> {
    let segments = clean_segments(raw)?;
    if segments.is_empty() {
        return Err(PathError::invalid(raw, "empty path"));
    }
    if strip >= segments.len() {
        return Err(PathError::invalid(
            raw,
            "strip count removes every path element",
        ));
    }
    Ok(segments[strip..].join("/"))
}

/// Segments of a runtime lookup path. An empty list addresses the root.
pub fn normalize_query(raw: &str) -> Result<Vec<String>, PathError> {
    clean_segments(raw)
}

/// Whether `path` is already in the form [`normalize_path`] produces.
pub fn is_canonical(path: &str) -> bool {
    matches!(normalize_path(path, 0), Ok(ref normalized) if normalized == path)
}

/// Normalizes paths for one generation run and rejects collisions.
///
/// A collision is a repeated file path, or a file path that is also a
/// directory of another file in the same run.
#[derive(Debug, Default)]
pub struct PathNormalizer {
    strip: usize,
    seen: BTreeSet<String>,
    dirs: BTreeSet<String>,
}

impl PathNormalizer {
    pub fn new(strip: usize) -> Self {
        Self {
            strip,
            seen: BTreeSet::new(),
            dirs: BTreeSet::new(),
        }
    }

    /// Normalize `raw` and claim the result for this run.
    pub fn normalize(&mut self, raw: &str) -> Result<String, PathError> {
        let path = normalize_path(raw, self.strip)?;
        if self.seen.contains(&path) {
            return Err(PathError::Duplicate { path });
        }
        if self.dirs.contains(&path) {
            let existing = format!("{path}/");
            return Err(PathError::Conflict { path, existing });
        }
        let parents: Vec<&str> = path
            .match_indices('/')
            .map(|(index, _)| &path[..index])
            .collect();
        if let Some(file) = parents.iter().find(|parent| self.seen.contains(**parent)) {
            let existing = file.to_string();
            return Err(PathError::Conflict { path, existing });
        }

        for parent in parents {
            self.dirs.insert(parent.to_string());
        }
        self.seen.insert(path.clone());
        Ok(path)
    }

    pub fn strip(&self) -> usize {
        self.strip
    }

    /// Number of paths claimed so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
