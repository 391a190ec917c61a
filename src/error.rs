//! Error handling for LCW operations
//!
//! The decoder has no failure path. Errors only arise in the adapters that
//! load palettes, build images and touch the filesystem.

pub use crate::common::LcwError;
pub use crate::common::Result;
