//! Configuration for merging and splitting.
//!
//! All structs have a `Default` matching the behavior described in the crate
//! docs and deserialize from JSON with every field optional:
//!
//! ```json
//! {
//!   "merge": { "steps": "COMPOUND | PHRASE | PREPOSITION", "phrase_avoid": ["DET"] },
//!   "split": { "mask_token": "<mask>", "completion_timeout": 2.5 }
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::labels::{DepSet, PosSet};

bitflags::bitflags! {
    /// Steps of a full merge pass, applied in the order listed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MergeSteps: u8 {
        const COMPOUND    = 1 << 0;
        const PHRASE      = 1 << 1;
        const PREPOSITION = 1 << 2;
        const PUNCT       = 1 << 3;
        const CONJUNCTION = 1 << 4;
        const APPOSITIVE  = 1 << 5;
    }
}

impl Default for MergeSteps {
    /// Everything except punctuation and noun conjunctions.
    fn default() -> Self {
        MergeSteps::all() - MergeSteps::PUNCT - MergeSteps::CONJUNCTION
    }
}

/// Settings for [`merge_all`](crate::merge_all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub steps: MergeSteps,
    /// A noun chunk starting with one of these POS tags is merged without its
    /// first token.
    pub phrase_avoid: PosSet,
    /// Labels treated as appositives.
    pub appos_labels: DepSet,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig { steps: MergeSteps::default(), phrase_avoid: PosSet::empty(), appos_labels: DepSet::APPOS }
    }
}

/// Settings for clause decomposition and placeholder filling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Stands in for a missing subject until the completion service fills it.
    pub mask_token: String,
    /// Stands in for the subject of a carved-out clause that has none.
    pub subject_placeholder: String,
    /// Limit for one completion request.
    #[serde(with = "seconds")]
    pub completion_timeout: Duration,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            mask_token: "<mask>".to_string(),
            subject_placeholder: "_".to_string(),
            completion_timeout: Duration::from_secs(10),
        }
    }
}

/// Top-level options, as read by the CLI `--config` flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub merge: MergeConfig,
    pub split: SplitConfig,
}

impl Options {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

/// `Duration` as fractional seconds.
mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
