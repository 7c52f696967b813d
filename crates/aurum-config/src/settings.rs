//! Runtime settings: quota range, timezone, paths, caption boilerplate.
//!
//! Loaded from `config.toml` in the XDG config dir (or an explicit
//! `--config` path). Every field has a default so a missing file means
//! "run with the built-in brand setup", not an error.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::paths;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Root directory of the product images (category assets live in
    /// `<images_dir>/services`, gallery shots in `<images_dir>/gallery`).
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// Watermark logo overlaid bottom-right on every post.
    #[serde(default = "default_logo_path")]
    pub logo_path: PathBuf,

    /// Where composed images are written. Defaults to `<state dir>/out`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Explicit rotation state file path. Defaults to the XDG state dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,

    /// Inclusive lower bound of the per-day post quota.
    #[serde(default = "default_min_posts")]
    pub min_posts_per_day: u32,

    /// Inclusive upper bound of the per-day post quota.
    #[serde(default = "default_max_posts")]
    pub max_posts_per_day: u32,

    /// Fixed offset from UTC, in minutes, defining the local posting day.
    /// Default is +330 (IST).
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Maximum entries kept in the used-combination history window.
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    #[serde(default = "default_brand_handle")]
    pub brand_handle: String,

    /// Contact block appended to every caption, one line per entry.
    #[serde(default = "default_contact_lines")]
    pub contact_lines: Vec<String>,

    /// Telegram chat to post into. `TELEGRAM_CHAT_ID` in the environment
    /// overrides this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_chat_id: Option<String>,

    #[serde(default)]
    pub hashtags: HashtagPools,
}

/// Tag pools sampled into each caption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashtagPools {
    /// Always included, in order.
    #[serde(default = "default_core_tags")]
    pub core: Vec<String>,
    #[serde(default = "default_neighborhood_tags")]
    pub neighborhoods: Vec<String>,
    #[serde(default = "default_style_tags")]
    pub style: Vec<String>,
    #[serde(default = "default_region_tags")]
    pub region: Vec<String>,
    #[serde(default = "default_category_tags")]
    pub category: Vec<String>,
    /// Cap on the total number of tags per caption.
    #[serde(default = "default_total_tags")]
    pub total: usize,
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("assets/images")
}

fn default_logo_path() -> PathBuf {
    PathBuf::from("assets/logos/aurum-logo-gold.png")
}

fn default_min_posts() -> u32 {
    2
}

fn default_max_posts() -> u32 {
    5
}

fn default_utc_offset_minutes() -> i32 {
    330
}

fn default_history_cap() -> usize {
    48
}

fn default_brand_handle() -> String {
    "@aurum.bespoke".to_string()
}

fn default_contact_lines() -> Vec<String> {
    vec![
        "Book Your Home Visit".to_string(),
        "WhatsApp: +91 81055 08503".to_string(),
        "Website: www.aurumbespoke.com".to_string(),
    ]
}

fn default_core_tags() -> Vec<String> {
    to_strings(&["#AurumBespoke", "#Bangalore", "#Bengaluru"])
}

fn default_neighborhood_tags() -> Vec<String> {
    to_strings(&[
        "#Indiranagar",
        "#Koramangala",
        "#HSRLAYOUT",
        "#Whitefield",
        "#ElectronicCity",
        "#JPnagar",
        "#Jayanagar",
        "#Basavanagudi",
        "#Banashankari",
        "#BTM",
        "#Marathahalli",
        "#Bellandur",
        "#Hebbal",
        "#Yelahanka",
        "#Malleshwaram",
    ])
}

fn default_style_tags() -> Vec<String> {
    to_strings(&[
        "#Menswear",
        "#MensStyle",
        "#LuxuryMenswear",
        "#Bespoke",
        "#Tailoring",
        "#MadeToMeasure",
        "#SuitUp",
        "#SharpStyle",
        "#TailorMade",
    ])
}

fn default_region_tags() -> Vec<String> {
    to_strings(&[
        "#Karnataka",
        "#NammaBengaluru",
        "#KarnatakaFashion",
        "#BangaloreFashion",
    ])
}

fn default_category_tags() -> Vec<String> {
    to_strings(&[
        "#Suit",
        "#Suits",
        "#Tuxedo",
        "#Tuxedos",
        "#Sherwani",
        "#Sherwanis",
        "#Bandgala",
        "#BandgalaStyle",
        "#Pathani",
        "#PathaniSuit",
        "#Blazer",
        "#ModiJacket",
        "#BespokeSuits",
        "#MensOutfit",
        "#IndianGroom",
        "#GroomOutfit",
    ])
}

fn default_total_tags() -> usize {
    15
}

fn to_strings(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

impl Default for HashtagPools {
    fn default() -> Self {
        Self {
            core: default_core_tags(),
            neighborhoods: default_neighborhood_tags(),
            style: default_style_tags(),
            region: default_region_tags(),
            category: default_category_tags(),
            total: default_total_tags(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            images_dir: default_images_dir(),
            logo_path: default_logo_path(),
            output_dir: None,
            state_file: None,
            min_posts_per_day: default_min_posts(),
            max_posts_per_day: default_max_posts(),
            utc_offset_minutes: default_utc_offset_minutes(),
            history_cap: default_history_cap(),
            brand_handle: default_brand_handle(),
            contact_lines: default_contact_lines(),
            telegram_chat_id: None,
            hashtags: HashtagPools::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default config location, or
    /// fall back to built-in defaults when no file exists.
    ///
    /// An explicit `path` that is missing or malformed is an error; the
    /// default location is allowed to be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config file: {}", p.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("Failed to parse config file: {}", p.display()))?
            }
            None => match paths::config_file() {
                Some(p) if p.exists() => {
                    let raw = std::fs::read_to_string(&p)
                        .with_context(|| format!("Failed to read config file: {}", p.display()))?;
                    toml::from_str(&raw)
                        .with_context(|| format!("Failed to parse config file: {}", p.display()))?
                }
                _ => {
                    debug!("no config file found, using built-in defaults");
                    Self::default()
                }
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_posts_per_day == 0 {
            bail!("max_posts_per_day must be at least 1");
        }
        if self.min_posts_per_day > self.max_posts_per_day {
            bail!(
                "min_posts_per_day ({}) exceeds max_posts_per_day ({})",
                self.min_posts_per_day,
                self.max_posts_per_day
            );
        }
        if self.utc_offset_minutes.abs() >= 24 * 60 {
            bail!(
                "utc_offset_minutes ({}) must be within a day",
                self.utc_offset_minutes
            );
        }
        if self.history_cap == 0 {
            bail!("history_cap must be at least 1");
        }
        if self.hashtags.total == 0 {
            bail!("hashtags.total must be at least 1");
        }
        Ok(())
    }

    /// Effective rotation state file path.
    pub fn state_file(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(paths::state_file)
    }

    /// Effective output directory for composed media.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| paths::state_dir().join("out"))
    }
}
