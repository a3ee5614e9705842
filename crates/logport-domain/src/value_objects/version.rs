//! Facade API versions declared by backends
//!
//! Backends announce the facade version they were built against. Versions
//! are compared numerically on `major.minor.patch`; anything after the
//! numeric part (`.RC1`, `-beta`, `+build`) is kept for display but ignored
//! for ordering.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A parsed facade version
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FacadeVersion {
    major: u64,
    minor: u64,
    patch: u64,
    qualifier: Option<String>,
}

impl FacadeVersion {
    /// Create a version from its numeric parts
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            qualifier: None,
        }
    }

    /// Major component
    pub fn major(&self) -> u64 {
        self.major
    }

    /// Minor component
    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// Patch component
    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Trailing qualifier, if any
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    fn numeric(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl FromStr for FacadeVersion {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_version(input, "empty version string"));
        }

        let mut numbers = [0u64; 3];
        let mut parsed = 0;
        let mut rest = trimmed;

        while parsed < 3 {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                break;
            }
            numbers[parsed] = rest[..digits]
                .parse()
                .map_err(|_| Error::invalid_version(input, "numeric component out of range"))?;
            parsed += 1;
            rest = &rest[digits..];

            // Only a '.' followed by another digit continues the numeric part
            match rest.strip_prefix('.') {
                Some(after) if after.starts_with(|c: char| c.is_ascii_digit()) && parsed < 3 => {
                    rest = after;
                }
                _ => break,
            }
        }

        if parsed < 2 {
            return Err(Error::invalid_version(
                input,
                "expected at least major.minor",
            ));
        }

        let qualifier = rest.trim_start_matches(['.', '-', '+']);
        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
            qualifier: (!qualifier.is_empty()).then(|| qualifier.to_string()),
        })
    }
}

impl TryFrom<String> for FacadeVersion {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FacadeVersion> for String {
    fn from(value: FacadeVersion) -> Self {
        value.to_string()
    }
}

impl fmt::Display for FacadeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, "-{qualifier}")?;
        }
        Ok(())
    }
}

impl PartialEq for FacadeVersion {
    fn eq(&self, other: &Self) -> bool {
        self.numeric() == other.numeric()
    }
}

impl Eq for FacadeVersion {}

impl PartialOrd for FacadeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FacadeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numeric().cmp(&other.numeric())
    }
}

/// Half-open range `[min, max)` of accepted facade versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    /// Lowest accepted version (inclusive)
    pub min: FacadeVersion,
    /// First rejected version (exclusive)
    pub max: FacadeVersion,
}

impl VersionRange {
    /// Create a range, rejecting empty ones
    pub fn new(min: FacadeVersion, max: FacadeVersion) -> Result<Self> {
        if min >= max {
            return Err(Error::configuration(format!(
                "Empty facade version range: [{min}, {max})"
            )));
        }
        Ok(Self { min, max })
    }

    /// Parse both bounds and build a range
    pub fn parse(min: &str, max: &str) -> Result<Self> {
        Self::new(min.parse()?, max.parse()?)
    }

    /// Whether `version` falls inside the range
    pub fn contains(&self, version: &FacadeVersion) -> bool {
        *version >= self.min && *version < self.max
    }
}

impl Default for VersionRange {
    fn default() -> Self {
        Self {
            min: FacadeVersion::new(0, 1, 0),
            max: FacadeVersion::new(0, 2, 0),
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.min, self.max)
    }
}
