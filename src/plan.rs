//! The files a sync touches and what happens to each of them.

use crate::rewrite::{ArraySpec, Pass};
use std::path::PathBuf;

/// Offsets table location, relative to the workspace root.
pub const TABLE_PATH: &str = "pubg/src/schema/offsets.txt";

pub const CLIENT_RS: &str = "pubg/src/schema/client.rs";
pub const DECRYPT_RS: &str = "pubg/src/state/decrypt.rs";
pub const GNAME_CACHE_RS: &str = "pubg/src/state/gname_cache.rs";
pub const PLAYER_RS: &str = "pubg/src/state/player.rs";

/// A file to rewrite and the passes to run over it, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Path relative to the workspace root
    pub path: PathBuf,
    pub passes: Vec<Pass>,
}

impl Target {
    pub fn new(path: impl Into<PathBuf>, passes: Vec<Pass>) -> Self {
        Self {
            path: path.into(),
            passes,
        }
    }
}

/// The fixed set of targets. Struct sizes always run after field offsets.
pub fn default_targets() -> Vec<Target> {
    vec![
        Target::new(
            CLIENT_RS,
            vec![Pass::TaggedConsts, Pass::FieldOffsets, Pass::StructSizes],
        ),
        Target::new(DECRYPT_RS, vec![Pass::TaggedConsts]),
        Target::new(GNAME_CACHE_RS, vec![Pass::TaggedConsts]),
        Target::new(
            PLAYER_RS,
            vec![
                Pass::TaggedConsts,
                Pass::KeyedArray(ArraySpec::health_xor_keys()),
            ],
        ),
    ]
}
