use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::DomainError;

/// A slash-delimited package import path such as `github.com/acme/widget`.
///
/// Invariant: relative, non-empty, and every segment is a plain name (no
/// empty, `.` or `..` segments). Backslashes are accepted as separators and
/// normalised to `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PackagePath(String);

impl PackagePath {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidPackagePath {
            path: input.to_owned(),
            reason: reason.to_owned(),
        };

        let normalized = input.trim().replace('\\', "/");
        if normalized.starts_with('/') || has_drive_prefix(&normalized) {
            return Err(invalid("must be relative to the workspace root"));
        }

        let normalized = normalized.trim_end_matches('/');
        if normalized.is_empty() {
            return Err(invalid("package path is required"));
        }

        for segment in normalized.split('/') {
            match segment {
                "" => return Err(invalid("contains an empty segment")),
                "." | ".." => return Err(invalid("'.' and '..' segments are not allowed")),
                _ => {}
            }
        }

        Ok(Self(normalized.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Trailing segment, used as the Go package name.
    pub fn package_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Platform path made of the segments, relative to any root.
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments().collect()
    }
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

impl fmt::Display for PackagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackagePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
