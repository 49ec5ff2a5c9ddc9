//! Frame-stepped Space Invaders combat simulation.
//!
//! The library half is pure and renderer-agnostic: `config` holds the
//! immutable session tunables, `entities` the plain data types, and
//! `compute` the per-frame logic.  A host drives it by calling one
//! `compute::tick` per rendered frame and supplies everything else:
//! input, a monotonic millisecond clock for the shot cooldown, and the
//! drawing of each entity's box.  The bundled binary is one such host,
//! rendering to the terminal.

pub mod compute;
pub mod config;
pub mod entities;
