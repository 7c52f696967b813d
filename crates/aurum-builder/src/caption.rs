//! Caption and hashtag assembly.

use aurum_config::{Category, HashtagPools, Settings};
use aurum_core::format_serial;
use rand::Rng;
use rand::seq::SliceRandom;

/// How many tags are sampled from each pool before the dedup/shuffle/cap.
const NEIGHBORHOOD_SAMPLE: usize = 3;
const STYLE_SAMPLE: usize = 3;
const REGION_SAMPLE: usize = 2;
const CATEGORY_SAMPLE: usize = 4;

/// Sample a hashtag line: core tags always in, a few from each pool,
/// deduplicated, shuffled, capped at `pools.total`.
pub fn build_hashtags(pools: &HashtagPools, rng: &mut impl Rng) -> String {
    let mut selection: Vec<String> = pools.core.clone();
    selection.extend(sample(&pools.neighborhoods, NEIGHBORHOOD_SAMPLE, rng));
    selection.extend(sample(&pools.style, STYLE_SAMPLE, rng));
    selection.extend(sample(&pools.region, REGION_SAMPLE, rng));
    selection.extend(sample(&pools.category, CATEGORY_SAMPLE, rng));

    let mut seen = std::collections::HashSet::new();
    let mut unique: Vec<String> = selection
        .into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect();
    unique.shuffle(rng);
    unique.truncate(pools.total);

    unique.join(" ")
}

fn sample(pool: &[String], count: usize, rng: &mut impl Rng) -> Vec<String> {
    pool.choose_multiple(rng, count.min(pool.len()))
        .cloned()
        .collect()
}

/// Assemble the full caption for a post.
pub fn build_caption(
    category: &Category,
    color_name: &str,
    serial: u32,
    settings: &Settings,
    hashtags: &str,
) -> String {
    let mut caption = format!(
        "Aurum Bespoke | {} ({})\nSL No: {}\n\n{} {}\n",
        category.name,
        color_name,
        format_serial(serial),
        category.emojis,
        category.caption,
    );
    if !settings.contact_lines.is_empty() {
        caption.push('\n');
        for line in &settings.contact_lines {
            caption.push_str(line);
            caption.push('\n');
        }
    }
    caption.push('\n');
    caption.push_str(&settings.brand_handle);
    caption.push_str("\n\n");
    caption.push_str(hashtags);
    caption
}
