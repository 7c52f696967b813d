//! `aurum init`: write a commented starter config.

use anyhow::{Context, Result, bail};
use std::path::Path;

const CONFIG_TEMPLATE: &str = r##"# Aurum autopost configuration.
# Every key is optional; the built-in defaults match the brand setup.

# Root of the product image tree. Bare asset names resolve under
# "<images_dir>/services".
images_dir = "assets/images"

# Watermark overlaid bottom-right on every post.
logo_path = "assets/logos/aurum-logo-gold.png"

# Posts per local day are drawn once per day from this inclusive range.
min_posts_per_day = 2
max_posts_per_day = 5

# The posting day rolls over at midnight at this fixed UTC offset
# (330 = IST, UTC+5:30).
utc_offset_minutes = 330

# How many recent combinations are remembered for repeat avoidance.
history_cap = 48

brand_handle = "@aurum.bespoke"
contact_lines = [
    "Book Your Home Visit",
    "WhatsApp: +91 81055 08503",
    "Website: www.aurumbespoke.com",
]

# Telegram chat to post into. TELEGRAM_CHAT_ID in the environment wins.
# telegram_chat_id = "-1001234567890"

# [hashtags]
# total = 15
# core = ["#AurumBespoke", "#Bangalore", "#Bengaluru"]
"##;

/// Write the starter `config.toml` to `path`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    std::fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}
