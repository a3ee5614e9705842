//! Log records handed to backends

use super::level::Level;
use super::marker::Marker;
use std::fmt;

/// A single log call, borrowed for the duration of the backend dispatch
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    level: Level,
    logger: &'a str,
    marker: Option<&'a Marker>,
    args: fmt::Arguments<'a>,
}

impl<'a> Record<'a> {
    /// Create a record
    pub fn new(
        level: Level,
        logger: &'a str,
        marker: Option<&'a Marker>,
        args: fmt::Arguments<'a>,
    ) -> Self {
        Self {
            level,
            logger,
            marker,
            args,
        }
    }

    /// Record level
    pub fn level(&self) -> Level {
        self.level
    }

    /// Name of the logger that issued the record
    pub fn logger(&self) -> &'a str {
        self.logger
    }

    /// Attached marker, if any
    pub fn marker(&self) -> Option<&'a Marker> {
        self.marker
    }

    /// Unformatted message arguments
    pub fn args(&self) -> &fmt::Arguments<'a> {
        &self.args
    }
}
