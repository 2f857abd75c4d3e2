//! Speech synthesis engines.
//!
//! This module contains implementations of speech synthesis engines.
//!
//! # Available Engines
//!
//! - `formant` - Table-driven formant synthesis (pure computation, no model files)

pub mod formant;
