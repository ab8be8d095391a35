//! Wayfinder CLI library.
//!
//! Route rendering helpers shared by the `wayfinder` binary and its tests.

pub mod output;
