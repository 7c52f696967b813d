use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Serial numbers wrap back to 1 after this value.
pub const SERIAL_CEILING: u32 = 999;

/// A fully-qualified post candidate: one category, one source asset, one
/// visual variant, one post-processing effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub category: String,
    pub asset: String,
    pub variant: String,
    pub effect: String,
}

impl Combination {
    /// Stable uniqueness key used for repeat avoidance.
    pub fn key(&self) -> String {
        format!(
            "{}::{}::{}::{}",
            self.category, self.asset, self.variant, self.effect
        )
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) [{} + {}]",
            self.category, self.asset, self.variant, self.effect
        )
    }
}

/// Zero-padded serial label as it appears in captions and file names.
pub fn format_serial(serial: u32) -> String {
    format!("{serial:03}")
}

/// The serial that follows `last`, wrapping to 1 past [`SERIAL_CEILING`].
///
/// Never returns 0: the label space is 1..=999.
pub fn next_serial_after(last: u32) -> u32 {
    if last >= SERIAL_CEILING { 1 } else { last + 1 }
}

/// Output format for CLI responses
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
