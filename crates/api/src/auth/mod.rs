//! Authentication primitives.

pub mod basic;
