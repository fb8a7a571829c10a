//! Command implementations.

pub mod seed;
pub mod storage;
