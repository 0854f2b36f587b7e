#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for double-auction market rounds.
///
/// This module contains the curve algebra (points, piecewise-linear curves,
/// their combinators and the intersection search) as well as the market side
/// and round state types a participant tracks.
///
/// The models are pure data structures and functions; nothing in here performs
/// I/O or holds shared mutable state.
pub mod models;

/// Interface traits for market participants.
///
/// These are the "ports" that separate the participant logic from the RPC
/// transport used to reach the market coordinator and from the sink used for
/// diagnostic output.
pub mod ports;
