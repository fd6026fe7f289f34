//! Footprint documents: the serde shapes going into and out of the
//! generator.
//!
//! A footprint document looks like:
//!
//! ```json
//! {
//!   "name": "R0603",
//!   "outline": [[0, 0], [4, 0], [4, 4], [0, 4]],
//!   "locks": [null, "north", null, "north"],
//!   "pads": [
//!     { "min_x": 3, "min_y": -1, "max_x": 5, "max_y": 1, "direction": "south" }
//!   ]
//! }
//! ```
//!
//! `locks` may be omitted, in which case every edge is unconstrained.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::direction::{Direction, Lock};
use super::engine::ExpansionReport;
use super::error::{SilkscreenError, SilkscreenResult};
use super::ring::Ring;
use crate::geometry::{Point, Polyline, Rect};

/// Default iteration cap for the expansion loop.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Default silkscreen stroke width in millimetres.
pub const DEFAULT_LINE_WIDTH: f64 = 0.15;

/// A rectangular pad keep-out with the side of the body it extends from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pad {
    /// Minimum X.
    pub min_x: f64,
    /// Minimum Y.
    pub min_y: f64,
    /// Maximum X.
    pub max_x: f64,
    /// Maximum Y.
    pub max_y: f64,
    /// Direction the pad extends from the body.
    pub direction: Direction,
}

impl Pad {
    /// Creates a pad from its rectangle and direction.
    #[must_use]
    pub const fn new(rect: Rect, direction: Direction) -> Self {
        Self {
            min_x: rect.min_x,
            min_y: rect.min_y,
            max_x: rect.max_x,
            max_y: rect.max_y,
            direction,
        }
    }

    /// The pad's rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    fn validate(&self, index: usize) -> SilkscreenResult<()> {
        if self.rect().is_proper() {
            Ok(())
        } else {
            Err(SilkscreenError::malformed(format!(
                "pad {index} is degenerate: [{}, {}] x [{}, {}]",
                self.min_x, self.max_x, self.min_y, self.max_y
            )))
        }
    }
}

/// Checks that every pad has finite bounds and positive extent.
///
/// # Errors
///
/// Returns [`SilkscreenError::MalformedInput`] naming the first bad pad.
pub fn validate_pads(pads: &[Pad]) -> SilkscreenResult<()> {
    pads.iter()
        .enumerate()
        .try_for_each(|(i, pad)| pad.validate(i))
}

/// A component footprint: body outline, edge locks and pads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Footprint {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Body outline vertices, either winding.
    pub outline: Vec<Point>,

    /// Per-edge locks; absent means all edges are unconstrained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locks: Option<Vec<Lock>>,

    /// Pads to clear.
    #[serde(default)]
    pub pads: Vec<Pad>,
}

impl Footprint {
    /// Creates an unnamed footprint with unlocked edges.
    #[must_use]
    pub const fn new(outline: Vec<Point>, pads: Vec<Pad>) -> Self {
        Self {
            name: None,
            outline,
            locks: None,
            pads,
        }
    }

    /// Sets the edge locks.
    #[must_use]
    pub fn with_locks(mut self, locks: Vec<Lock>) -> Self {
        self.locks = Some(locks);
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Reads a footprint document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SilkscreenError::FileRead`] if the file can't be read or
    /// [`SilkscreenError::InvalidDocument`] if it isn't a footprint
    /// document.
    pub fn read(path: impl AsRef<Path>) -> SilkscreenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SilkscreenError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| SilkscreenError::InvalidDocument {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Builds the validated, counter-clockwise working ring.
    ///
    /// # Errors
    ///
    /// Returns [`SilkscreenError::MalformedInput`] if the outline or locks
    /// are unusable.
    pub fn ring(&self) -> SilkscreenResult<Ring> {
        let locks = self
            .locks
            .clone()
            .unwrap_or_else(|| vec![None; self.outline.len()]);
        Ring::new(self.outline.clone(), locks)
    }
}

/// Tunables for a generation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilkscreenOptions {
    /// Cap on expansion plus repair steps.
    pub max_iterations: usize,
    /// Stroke width carried into the artwork.
    pub line_width: f64,
}

impl Default for SilkscreenOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

/// The generated silkscreen for one footprint.
#[derive(Debug, Clone, Serialize)]
pub struct SilkscreenArtwork {
    /// Name carried over from the footprint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expanded outline that clears every pad.
    pub ring: Ring,
    /// Silkscreen strokes: the expanded outline minus pad contact.
    pub polylines: Vec<Polyline>,
    /// Stroke width.
    pub line_width: f64,
    /// What the expansion loop did.
    pub report: ExpansionReport,
}

impl SilkscreenArtwork {
    /// Total stroke length.
    #[must_use]
    pub fn stroke_length(&self) -> f64 {
        self.polylines.iter().map(Polyline::length).sum()
    }
}
