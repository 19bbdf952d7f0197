//! Helpers shared by the cipher stages.

pub mod text;
