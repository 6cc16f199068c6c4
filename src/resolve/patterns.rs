//! Install-path pattern expansion.
//!
//! Patterns are path templates with `*` wildcards inside segments. A leading
//! `:` makes the pattern drive-relative (`:\Program Files\Git`); the scan
//! substitutes each drive root in turn. Patterns without the marker resolve
//! relative to the working directory.
//!
//! Expansion is deterministic: directory entries are visited in sorted
//! order and the first complete match wins. Matching is case-insensitive,
//! like the filesystems these patterns target.

use std::path::{Path, PathBuf};

/// Marker prefix for drive-relative patterns.
const DRIVE_MARKER: char = ':';

/// True when the pattern needs a drive root substituted.
pub fn is_drive_relative(pattern: &str) -> bool {
    pattern.starts_with(DRIVE_MARKER)
}

/// Expand a pattern against a drive root, returning the first match.
///
/// Relative patterns ignore the drive root and resolve against the working
/// directory.
pub fn expand(pattern: &str, drive_root: &Path) -> Option<PathBuf> {
    let (base, remainder): (PathBuf, &str) = if is_drive_relative(pattern) {
        let stripped = pattern
            .trim_start_matches(DRIVE_MARKER)
            .trim_start_matches(['\\', '/']);
        (drive_root.to_path_buf(), stripped)
    } else {
        (PathBuf::from("."), pattern)
    };

    let segments: Vec<&str> = remainder
        .split(['\\', '/'])
        .filter(|s| !s.is_empty())
        .collect();

    expand_segments(&base, &segments)
}

/// Recursive segment walk: literal segments descend directly, wildcard
/// segments enumerate the directory and try candidates in sorted order.
fn expand_segments(dir: &Path, segments: &[&str]) -> Option<PathBuf> {
    let Some((segment, rest)) = segments.split_first() else {
        return dir.exists().then(|| dir.to_path_buf());
    };

    if segment.contains('*') {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .ok()?
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| wildcard_match(segment, name))
            .collect();
        names.sort();

        for name in names {
            if let Some(found) = expand_segments(&dir.join(&name), rest) {
                return Some(found);
            }
        }
        None
    } else {
        expand_segments(&dir.join(segment), rest)
    }
}

/// Match a single segment pattern against a name. `*` matches any run of
/// characters; comparison is case-insensitive.
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern = pattern.to_ascii_lowercase();
    let text = text.to_ascii_lowercase();

    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == text;
    }

    let mut pos = 0;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            if !text.starts_with(part) {
                return false;
            }
            pos = part.len();
        } else if i == parts.len() - 1 {
            return text.len() >= pos + part.len() && text.ends_with(part);
        } else {
            match text[pos..].find(part) {
                Some(found) => pos += found + part.len(),
                None => return false,
            }
        }
    }
    true
}
