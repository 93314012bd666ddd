//! Utility functions for formatting values for display and wire encoding.

pub mod formatting;

pub use formatting::{truncate_id, with_0x_prefix, without_0x_prefix};
