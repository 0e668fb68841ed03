// Each test binary only uses part of the helpers
#![allow(dead_code)]

pub mod fake_gemini;
pub mod match_helpers;
pub mod memory_store;
pub mod utils;
