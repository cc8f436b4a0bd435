use std::fmt;
use std::str::FromStr;

use crate::error::{MeshwireError, MeshwireResult};

/// Segment delimiter used when a path is lowered to its wire form.
pub const DELIMITER: char = '/';

/// Address of a node in the remote scene tree.
///
/// A `Path` is immutable: [`Path::append`] always returns a new path and
/// leaves the receiver untouched. The empty path addresses the scene root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The scene root (no segments).
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from a list of segments, validating each one.
    pub fn from_segments<I, S>(segments: I) -> MeshwireResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        segments
            .into_iter()
            .try_fold(Self::root(), |path, segment| path.append(segment.as_ref()))
    }

    /// Return a new path with `segment` added at the end.
    pub fn append(&self, segment: &str) -> MeshwireResult<Path> {
        validate_segment(segment)?;
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Path { segments })
    }

    /// Resolve a `/`-delimited path expression relative to this path.
    ///
    /// A leading `/` restarts from the root. Empty pieces (`"a//b"`, trailing
    /// slashes) are skipped.
    pub fn resolve(&self, target: &str) -> MeshwireResult<Path> {
        let base = if target.starts_with(DELIMITER) {
            Path::root()
        } else {
            self.clone()
        };
        target.split(DELIMITER)
            .filter(|piece| !piece.is_empty())
            .try_fold(base, |path, piece| path.append(piece))
    }

    /// The path one level up, or `None` at the root.
    pub fn parent(&self) -> Option<Path> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Path {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Wire form: segments joined with `/`. The root lowers to `""`.
    pub fn lower(&self) -> String {
        self.segments.join("/")
    }
}

fn validate_segment(segment: &str) -> MeshwireResult<()> {
    if segment.is_empty() {
        return Err(MeshwireError::invalid_segment(segment, "segment is empty"));
    }
    if segment.contains(DELIMITER) {
        return Err(MeshwireError::invalid_segment(
            segment,
            format!("segment contains the delimiter '{}'", DELIMITER),
        ));
    }
    Ok(())
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lower())
    }
}

impl FromStr for Path {
    type Err = MeshwireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::root().resolve(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_lowers_to_empty() {
        assert_eq!(Path::root().lower(), "");
        assert!(Path::root().is_root());
    }

    #[test]
    fn test_append_from_root() {
        let p = Path::root().append("box").unwrap();
        assert_eq!(p.lower(), "box");
    }

    #[test]
    fn test_append_extends_lowered_form() {
        let p = Path::from_segments(["meshcat", "robot"]).unwrap();
        let child = p.append("arm").unwrap();
        assert_eq!(child.lower(), format!("{}/{}", p.lower(), "arm"));
        // receiver untouched
        assert_eq!(p.segments().len(), 2);
    }

    #[test]
    fn test_append_rejects_empty_segment() {
        let err = Path::root().append("").unwrap_err();
        assert!(matches!(err, MeshwireError::InvalidSegment { .. }));
    }

    #[test]
    fn test_append_rejects_delimiter() {
        let err = Path::root().append("a/b").unwrap_err();
        assert!(matches!(err, MeshwireError::InvalidSegment { .. }));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let base = Path::from_segments(["meshcat"]).unwrap();
        assert_eq!(base.resolve("robot/arm").unwrap().lower(), "meshcat/robot/arm");
        assert_eq!(base.resolve("/Background").unwrap().lower(), "Background");
        assert_eq!(base.resolve("a//b/").unwrap().lower(), "meshcat/a/b");
    }

    #[test]
    fn test_from_segments_validates_every_segment() {
        let err = Path::from_segments(["ok", "a/b"]).unwrap_err();
        assert!(matches!(err, MeshwireError::InvalidSegment { ref segment, .. } if segment == "a/b"));
        assert!(Path::from_segments(["ok", ""]).is_err());
    }

    #[test]
    fn test_parent() {
        let p: Path = "a/b".parse().unwrap();
        assert_eq!(p.parent().unwrap().lower(), "a");
        assert!(Path::root().parent().is_none());
    }

    #[test]
    fn test_display_matches_lower() {
        let p: Path = "x/y/z".parse().unwrap();
        assert_eq!(p.to_string(), "x/y/z");
    }
}
