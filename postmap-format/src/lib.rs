//! postmap Format - Wire primitives for the object-to-wire mapping engine
//!
//! This crate provides the fundamental building blocks shared by the engine
//! and the domain model, with no mapping logic of its own. It includes:
//!
//! - Wire value and wire mapping types
//! - The snake_case key naming convention
//! - Null pruning and list joining helpers
//! - Error types
//! - Constants and wire formats

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod naming;
pub mod wire;

// Re-export commonly used types
pub use error::{MapError, Result};
pub use naming::to_snake_case;
pub use wire::{join_list, prune_absent, WireMapping, WireValue};
