//! The expansion loop.
//!
//! ```text
//!   Expanding --(expansion applied)--> Repairing
//!   Expanding --(none found)---------> Done
//!   Repairing --(repair applied)-----> Repairing
//!   Repairing --(none needed)--------> Expanding
//! ```
//!
//! Every applied expansion and every applied repair counts towards the
//! iteration cap.

use serde::Serialize;
use tracing::{info, warn};

use super::error::{SilkscreenError, SilkscreenResult};
use super::expand::find_expansion;
use super::footprint::Pad;
use super::repair::find_repair;
use super::ring::Ring;

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Looking for the next edge run to push out.
    Expanding,
    /// Removing self-intersections left by the last expansion.
    Repairing,
    /// No edge needs to move; the ring is final.
    Done,
}

/// Counts of what the loop did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExpansionReport {
    /// Expansions applied.
    pub expansions: usize,
    /// Repairs applied.
    pub repairs: usize,
}

impl ExpansionReport {
    /// Total steps applied, as counted against the iteration cap.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.expansions + self.repairs
    }
}

/// Drives a ring through expansion and repair until it clears every pad.
#[derive(Debug)]
pub struct ExpansionLoop<'a> {
    ring: Ring,
    pads: &'a [Pad],
    state: LoopState,
    max_iterations: usize,
    report: ExpansionReport,
}

impl<'a> ExpansionLoop<'a> {
    /// Creates a loop over a validated ring.
    #[must_use]
    pub const fn new(ring: Ring, pads: &'a [Pad], max_iterations: usize) -> Self {
        Self {
            ring,
            pads,
            state: LoopState::Expanding,
            max_iterations,
            report: ExpansionReport {
                expansions: 0,
                repairs: 0,
            },
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> LoopState {
        self.state
    }

    /// Current ring.
    #[must_use]
    pub const fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Steps taken so far.
    #[must_use]
    pub const fn report(&self) -> ExpansionReport {
        self.report
    }

    /// Performs one transition and returns the new state.
    ///
    /// Calling this in [`LoopState::Done`] is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SilkscreenError::NonConvergence`] when another step would
    /// exceed the cap, or [`SilkscreenError::InfeasibleRepair`] when a
    /// self-intersection can't be resolved.
    pub fn step(&mut self) -> SilkscreenResult<LoopState> {
        self.state = match self.state {
            LoopState::Expanding => match find_expansion(&self.ring, self.pads) {
                Some(expansion) => {
                    self.charge()?;
                    expansion.apply(&mut self.ring);
                    self.report.expansions += 1;
                    LoopState::Repairing
                }
                None => LoopState::Done,
            },
            LoopState::Repairing => match find_repair(&self.ring)? {
                Some(repair) => {
                    self.charge()?;
                    repair.apply(&mut self.ring);
                    self.report.repairs += 1;
                    LoopState::Repairing
                }
                None => {
                    if !self.ring.is_valid() || self.ring.signed_area() <= 0.0 {
                        return Err(SilkscreenError::infeasible_repair(
                            "outline is invalid but no intersecting edge pair was found",
                        ));
                    }
                    LoopState::Expanding
                }
            },
            LoopState::Done => LoopState::Done,
        };
        Ok(self.state)
    }

    /// Runs to completion.
    ///
    /// # Errors
    ///
    /// See [`ExpansionLoop::step`].
    pub fn run(mut self) -> SilkscreenResult<(Ring, ExpansionReport)> {
        loop {
            match self.step() {
                Ok(LoopState::Done) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        expansions = self.report.expansions,
                        repairs = self.report.repairs,
                        error = %e,
                        "Expansion loop failed"
                    );
                    return Err(e);
                }
            }
        }
        info!(
            expansions = self.report.expansions,
            repairs = self.report.repairs,
            points = self.ring.len(),
            "Expansion complete"
        );
        Ok((self.ring, self.report))
    }

    fn charge(&self) -> SilkscreenResult<()> {
        if self.report.steps() >= self.max_iterations {
            return Err(SilkscreenError::NonConvergence {
                iterations: self.max_iterations,
            });
        }
        Ok(())
    }
}
