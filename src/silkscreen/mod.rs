//! Silkscreen generation for component footprints.
//!
//! The body outline is pushed outward, one run of edges at a time, until no
//! edge passes through a pad. Each push can fold the outline over itself,
//! so every expansion is followed by repairs that cut the resulting loops
//! away. The final outline, minus wherever it touches a pad, is the
//! silkscreen.
//!
//! # Example
//!
//! ```
//! use silkscreen_mcp::geometry::{Point, Rect};
//! use silkscreen_mcp::silkscreen::{
//!     generate_silkscreen, Direction, Footprint, Pad, SilkscreenOptions,
//! };
//!
//! let outline = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(4.0, 4.0),
//!     Point::new(0.0, 4.0),
//! ];
//! let pads = vec![Pad::new(Rect::new(3.0, -1.0, 5.0, 1.0), Direction::South)];
//! let footprint = Footprint::new(outline, pads);
//!
//! let artwork = generate_silkscreen(&footprint, &SilkscreenOptions::default()).unwrap();
//! assert_eq!(artwork.ring.len(), 6);
//! assert_eq!(artwork.polylines.len(), 1);
//! ```

pub mod clip;
pub mod direction;
pub mod engine;
pub mod error;
pub mod expand;
pub mod footprint;
pub mod repair;
pub mod ring;

pub use clip::{clip_ring, cut};
pub use direction::{Direction, Lock, Projection};
pub use engine::{ExpansionLoop, ExpansionReport, LoopState};
pub use error::{SilkscreenError, SilkscreenResult};
pub use expand::{find_expansion, Expansion};
pub use footprint::{
    validate_pads, Footprint, Pad, SilkscreenArtwork, SilkscreenOptions, DEFAULT_LINE_WIDTH,
    DEFAULT_MAX_ITERATIONS,
};
pub use repair::{find_repair, Repair};
pub use ring::Ring;

use tracing::debug;

/// Expands the footprint outline until it clears every pad.
///
/// # Errors
///
/// Returns [`SilkscreenError::MalformedInput`] for unusable outlines, locks
/// or pads, and the loop's errors otherwise.
pub fn expand_outline(
    footprint: &Footprint,
    options: &SilkscreenOptions,
) -> SilkscreenResult<(Ring, ExpansionReport)> {
    let ring = footprint.ring()?;
    validate_pads(&footprint.pads)?;
    if options.max_iterations == 0 {
        return Err(SilkscreenError::malformed("max_iterations must be at least 1"));
    }
    debug!(
        name = footprint.name.as_deref().unwrap_or("<unnamed>"),
        points = ring.len(),
        pads = footprint.pads.len(),
        "Expanding outline"
    );
    ExpansionLoop::new(ring, &footprint.pads, options.max_iterations).run()
}

/// Expands the outline and cuts it back at the pads.
///
/// # Errors
///
/// See [`expand_outline`].
pub fn generate_silkscreen(
    footprint: &Footprint,
    options: &SilkscreenOptions,
) -> SilkscreenResult<SilkscreenArtwork> {
    let (ring, report) = expand_outline(footprint, options)?;
    let polylines = cut(&ring, &footprint.pads);
    Ok(SilkscreenArtwork {
        name: footprint.name.clone(),
        ring,
        polylines,
        line_width: options.line_width,
        report,
    })
}
