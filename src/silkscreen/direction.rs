//! Cardinal directions, edge locks and the projection predicates built on
//! them.

use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, Segment, TOLERANCE};

/// A cardinal unit direction.
///
/// Pads carry the side of the body they extend from; edges may carry one
/// as a lock restricting which pads may push them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// +X.
    East,
    /// -X.
    West,
    /// +Y.
    North,
    /// -Y.
    South,
}

/// Per-edge orientation lock; `None` leaves the edge unconstrained.
pub type Lock = Option<Direction>;

impl Direction {
    /// All four directions.
    pub const ALL: [Self; 4] = [Self::East, Self::West, Self::North, Self::South];

    /// The axis this direction's non-zero component lies on.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::East | Self::West => Axis::X,
            Self::North | Self::South => Axis::Y,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn negated(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::West => Self::East,
            Self::North => Self::South,
            Self::South => Self::North,
        }
    }

    /// True iff this direction's non-zero axis is the lock's zero axis.
    ///
    /// An absent lock is never perpendicular to anything.
    #[must_use]
    pub fn is_perpendicular_to(self, lock: Lock) -> bool {
        lock.is_some_and(|other| other.axis() != self.axis())
    }

    /// Direction along the push axis in which an edge is moved to clear a
    /// pad with this direction.
    ///
    /// Pads on the X axis push along -Y, pads on the Y axis along +X, each
    /// flipped by the sign of the edge's projection on the pad axis. For a
    /// counter-clockwise ring this is always away from the body.
    /// Returns `None` when the edge has no extent along the pad axis.
    #[must_use]
    pub fn push_for(self, edge: &Segment) -> Option<Self> {
        let projection = edge.projection(self.axis());
        if projection.abs() <= TOLERANCE {
            return None;
        }
        let base = match self.axis() {
            Axis::X => Self::South,
            Axis::Y => Self::East,
        };
        Some(if projection > 0.0 { base } else { base.negated() })
    }

    /// Returns true if the direction points towards increasing coordinates.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::East | Self::North)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::East => "east",
            Self::West => "west",
            Self::North => "north",
            Self::South => "south",
        };
        f.write_str(name)
    }
}

/// Sign of an edge's projection on the pad axis, relative to a reference
/// edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// No extent along the axis.
    Zero,
    /// Same sign as the reference edge.
    Along,
    /// Opposite sign to the reference edge.
    Against,
}

impl Projection {
    /// Classifies `edge` against a reference projection `reference` along
    /// `axis`.
    #[must_use]
    pub fn classify(edge: &Segment, axis: Axis, reference: f64) -> Self {
        let projection = edge.projection(axis);
        if projection.abs() <= TOLERANCE {
            Self::Zero
        } else if (projection > 0.0) == (reference > 0.0) {
            Self::Along
        } else {
            Self::Against
        }
    }
}
