//! # fretchord-core
//!
//! Configuration and the recognition service for fretchord, on top of the
//! pure types in `fretchord-types`.
//!
//! ```rust,ignore
//! use fretchord_core::config::Config;
//! use fretchord_core::recognizer::Recognizer;
//!
//! let config = Config::load();
//! let recognizer = Recognizer::from_config(&config);
//! let label = recognizer.recognize_chord(&positions, config.fret_offset());
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: TOML configuration (embedded defaults + user override):
//!   default fret offset, slash-chord display, scoring weights
//! - [`recognizer`]: `Recognizer`, which binds scoring weights to the
//!   pipeline, logs its decisions, and builds `Explanation`s

pub mod config;
pub mod recognizer;

pub use fretchord_types as types;
