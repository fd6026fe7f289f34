//! silkscreen-mcp: silkscreen outline generation for PCB footprints
//!
//! Given a component body outline and the rectangular pads around it, this
//! library grows the outline outward until it clears every pad and then
//! cuts it back wherever it still touches one. The result is a set of
//! polylines ready to be drawn on the silkscreen layer.
//!
//! # Architecture
//!
//! - **Geometry kernel**: points, segments, rectangles and simple polygons
//! - **Silkscreen engine**: the expand/repair loop and the final clip
//! - **MCP server**: exposes the engine to AI assistants over stdio
//!
//! # Modules
//!
//! - [`geometry`]: 2D predicates and segment merging
//! - [`silkscreen`]: outline expansion and silkscreen generation
//! - [`config`]: Configuration loading and validation
//! - [`error`]: Configuration error types
//! - [`mcp`]: MCP protocol implementation

pub mod config;
pub mod error;
pub mod geometry;
pub mod mcp;
pub mod silkscreen;
