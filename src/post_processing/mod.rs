//! Post-processing effects.

pub use self::bloom::{Bloom, BloomUniforms};

mod bloom;
