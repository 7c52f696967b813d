//! Product catalog: categories, their assets and caption lines, plus the
//! global variant / effect / color-grading tables.
//!
//! The built-in catalog mirrors the brand's seven garment lines. A
//! `catalog.toml` in the config dir replaces it wholesale — categories are
//! ordered, and the order matters for rotation.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    /// Ordered product categories. One asset is chosen per post.
    pub categories: Vec<Category>,

    /// Visual variants applicable to every category.
    #[serde(default = "default_variants")]
    pub variants: Vec<String>,

    /// Post-processing effects applicable to every category.
    #[serde(default = "default_effects")]
    pub effects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub name: String,

    /// Asset file names, resolved against the images root. Bare names live
    /// under `services/`, slash-containing names are taken as-is.
    pub files: Vec<String>,

    #[serde(default)]
    pub emojis: String,

    /// Core caption sentence for this category.
    pub caption: String,

    /// Named color gradings; the filter is an ffmpeg fragment.
    #[serde(default)]
    pub colors: Vec<ColorPreset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorPreset {
    pub name: String,
    pub filter: String,
}

fn default_variants() -> Vec<String> {
    [
        "none",
        "contrast_boost",
        "warm_tone",
        "cool_tone",
        "golden_hour",
        "vintage_film",
        "high_key",
        "low_key",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_effects() -> Vec<String> {
    [
        "none",
        "cinematic_crop",
        "motion_blur",
        "bokeh_effect",
        "film_grain",
        "light_leak",
        "color_pop",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn preset(name: &str, filter: &str) -> ColorPreset {
    ColorPreset {
        name: name.to_string(),
        filter: filter.to_string(),
    }
}

fn category(
    name: &str,
    files: &[&str],
    emojis: &str,
    caption: &str,
    colors: Vec<ColorPreset>,
) -> Category {
    Category {
        name: name.to_string(),
        files: files.iter().map(|s| s.to_string()).collect(),
        emojis: emojis.to_string(),
        caption: caption.to_string(),
        colors,
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            categories: vec![
                category(
                    "Bespoke Suits",
                    &["suit.jpg"],
                    "🕴️✨",
                    "Aurum Bespoke Suit — hand-cut, precision-tailored, and finished for commanding presence.",
                    vec![
                        preset("classic_black", "eq=contrast=1.15:saturation=0.4:brightness=-0.02"),
                        preset("midnight_navy", "eq=saturation=1.05,curves=blue='0/0 0.5/0.55 1/1'"),
                        preset("charcoal_heather", "eq=contrast=1.10:saturation=0.6:brightness=-0.01"),
                        preset("espresso_brown", "eq=saturation=1.05,colorchannelmixer=rr=1.0:gg=0.92:bb=0.82"),
                    ],
                ),
                category(
                    "Sherwanis",
                    &["sherwani.jpg"],
                    "👑🌟",
                    "Regal lines. Modern ease. The Aurum Sherwani — crafted for celebrations that matter.",
                    vec![
                        preset("ivory_silk", "eq=brightness=0.025:saturation=1.02,colorchannelmixer=rr=1.02:gg=1.01:bb=0.99"),
                        preset("royal_maroon", "curves=red='0/0 0.5/0.65 1/1',eq=saturation=1.02"),
                        preset("golden_thread", "drawbox=0:0:iw:ih:color=0xc99e67@0.12:t=fill,eq=saturation=1.03"),
                        preset("crystal_white", "eq=brightness=0.03:saturation=0.95"),
                    ],
                ),
                category(
                    "Tuxedos & Blazers",
                    &["blazer.jpg"],
                    "🎩🌙",
                    "Black-tie mastery. An Aurum Tuxedo that speaks in whispers and is heard across the room.",
                    vec![
                        preset("ebony_black", "eq=contrast=1.18:saturation=0.35:brightness=-0.025"),
                        preset("midnight_blue", "eq=saturation=1.04,curves=blue='0/0 0.5/0.58 1/1'"),
                        preset("pearl_white", "eq=brightness=0.02:saturation=0.92,curves=red='0/0 0.5/0.52 1/1'"),
                        preset("slate_grey", "eq=contrast=1.12:saturation=0.65:brightness=-0.01"),
                    ],
                ),
                category(
                    "Tailored Shirts",
                    &["shirt.jpg"],
                    "👔✨",
                    "Subtle details. Impeccable fit. The Aurum Tailored Shirt elevates every day.",
                    vec![
                        preset("crisp_white", "eq=brightness=0.03:saturation=0.92"),
                        preset("sky_blue", "curves=blue='0/0 0.5/0.58 1/1'"),
                        preset("charcoal_striped", "eq=contrast=1.08:saturation=0.55"),
                        preset("rose_pink", "colorchannelmixer=rr=1.05:gg=0.9:bb=0.95,eq=saturation=1.03"),
                    ],
                ),
                category(
                    "Pathani Suit",
                    &["pathani.jpg", "gallery/kurta.jpg"],
                    "🧵🌿",
                    "Classic comfort with tailored sharpness — Kurta Pathani by Aurum Bespoke.",
                    vec![
                        preset("jet_black", "eq=contrast=1.12:saturation=0.42:brightness=-0.02"),
                        preset("pure_white", "eq=brightness=0.025:saturation=0.92"),
                        preset("forest_olive", "colorchannelmixer=rr=0.95:gg=1.05:bb=0.9,eq=saturation=1.03"),
                        preset("sand_cream", "eq=brightness=0.015:saturation=1.02,colorchannelmixer=rr=1.01:gg=1.01:bb=0.97"),
                    ],
                ),
                category(
                    "Modi Jacket",
                    &["modi-jacket1.jpg", "gallery/indowestern.jpg"],
                    "🇮🇳✨",
                    "Iconic Modi Jacket — timeless, versatile, and tailored to perfection.",
                    vec![
                        preset("raven_black", "eq=contrast=1.13:saturation=0.4:brightness=-0.02"),
                        preset("ivory_cream", "eq=brightness=0.022:saturation=0.93"),
                        preset("autumn_rust", "colorchannelmixer=rr=1.05:gg=0.95:bb=0.9,eq=saturation=1.04"),
                        preset("stone_grey", "eq=contrast=1.07:saturation=0.65:brightness=-0.005"),
                    ],
                ),
                category(
                    "Bandgala",
                    &["bandgala.jpg", "gallery/bandgalla.jpg"],
                    "🥇🔥",
                    "Bandgala by Aurum — structured, stately, and unmistakably elegant.",
                    vec![
                        preset("snow_white", "eq=brightness=0.03:saturation=0.9"),
                        preset("onyx_black", "eq=contrast=1.15:saturation=0.4:brightness=-0.02"),
                        preset("royal_blue", "curves=blue='0/0 0.5/0.62 1/1',eq=saturation=1.04"),
                        preset("midnight_navy", "eq=saturation=1.03,curves=blue='0/0 0.5/0.55 1/1'"),
                    ],
                ),
            ],
            variants: default_variants(),
            effects: default_effects(),
        }
    }
}

impl Catalog {
    /// Load the catalog from `path`, or the default config location, or the
    /// built-in tables when no file exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let catalog = match path {
            Some(p) => Self::from_file(p)?,
            None => match crate::paths::catalog_file() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            bail!("catalog has no categories");
        }
        for cat in &self.categories {
            if cat.files.is_empty() {
                bail!("category '{}' lists no asset files", cat.name);
            }
        }
        if self.variants.is_empty() {
            bail!("catalog has no variants (use \"none\" for a pass-through)");
        }
        if self.effects.is_empty() {
            bail!("catalog has no effects (use \"none\" for a pass-through)");
        }
        Ok(())
    }

    pub fn find_category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }
}
