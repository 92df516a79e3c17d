use std::fmt;

use crate::Vector;

/// A line segment between two [`Vector`]s.
///
/// The endpoints may coincide, in which case the segment is *degenerate* (zero length, zero
/// direction).
#[derive(Debug, Clone, Default)]
pub struct Segment {
    pub start: Vector,
    pub end: Vector,
    name: Option<String>,
}

impl Segment {
    pub fn new(start: Vector, end: Vector) -> Self {
        Self {
            start,
            end,
            name: None,
        }
    }

    /// Returns `self` with its name set to `name`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name of this segment, or `fallback` if it is unnamed.
    pub fn label<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name().unwrap_or(fallback)
    }

    /// Returns `end - start`.
    pub fn direction(&self) -> Vector {
        &self.end - &self.start
    }

    /// Returns the point `start + t * (end - start)`.
    pub fn point_at(&self, t: f64) -> Vector {
        self.start.lerp(&self.end, t)
    }
}

// Endpoints only, like `Vector`.
impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}: ")?;
        }
        write!(f, "{} -> {}", self.start, self.end)
    }
}
