//! Helpers shared by the integration tests and the benchmarks.

#![allow(dead_code)]

pub use ukpr::Config;

#[path = "../../src/decompress/test_encoder.rs"]
mod encoder;

pub use encoder::*;
