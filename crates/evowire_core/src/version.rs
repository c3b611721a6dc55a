//! Schema version tag.

use std::fmt;

/// Schema version of a record.
///
/// The version is written first in every record stream and identifies
/// which evolving-field groups the writer included. Versions are
/// non-negative and compare numerically; a group introduced at version `v`
/// is present on the wire exactly when the stream's version is `>= v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(pub u32);

impl Version {
    /// The base schema version, before any evolving groups.
    pub const BASE: Self = Self(0);

    /// Creates a new version.
    #[must_use]
    pub const fn new(version: u32) -> Self {
        Self(version)
    }

    /// Returns the raw version number.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the next version.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Converts a decoded wire integer to a version.
    ///
    /// Returns `None` for negative values and values beyond `u32::MAX`.
    #[must_use]
    pub fn from_wire(raw: i64) -> Option<Self> {
        u32::try_from(raw).ok().map(Self)
    }

    /// The wire representation of this version.
    #[must_use]
    pub const fn as_wire(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_numeric() {
        assert!(Version::BASE < Version::new(1));
        assert!(Version::new(1) < Version::new(2));
        assert_eq!(Version::new(3).next(), Version::new(4));
    }

    #[test]
    fn wire_roundtrip() {
        for v in [0u32, 1, 7, u32::MAX] {
            let version = Version::new(v);
            assert_eq!(Version::from_wire(version.as_wire()), Some(version));
        }
    }

    #[test]
    fn out_of_range_wire_values_rejected() {
        assert_eq!(Version::from_wire(-1), None);
        assert_eq!(Version::from_wire(i64::MIN), None);
        assert_eq!(Version::from_wire(i64::from(u32::MAX) + 1), None);
    }

    #[test]
    fn display() {
        assert_eq!(Version::new(2).to_string(), "v2");
    }
}
