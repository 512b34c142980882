//! Command implementations.

pub mod encode;
pub mod generate;
pub mod list;
