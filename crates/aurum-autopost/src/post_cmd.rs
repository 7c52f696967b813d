//! The `post` command: the full decide → build → deliver → record cycle.
//!
//! Ordering is load-bearing. The state lock is held across the whole
//! cycle so overlapping scheduler triggers serialize; the quota gate's
//! date-rollover reset is persisted before any external side effect; and
//! `record_post` runs only after Telegram acknowledged the upload, so the
//! persisted state never claims a post that was not sent.

use anyhow::{Context, Result};
use aurum_builder::{
    build_caption, build_hashtags, compose_image, output_file_name, resolve_asset, usable_catalog,
};
use aurum_config::{Catalog, ColorPreset, Settings};
use aurum_core::{AppError, Combination, OutputFormat, format_serial};
use aurum_delivery::TelegramClient;
use aurum_rotation::{QuotaPolicy, RotationState, StateLock, choose_combination, should_post_today};
use chrono::Utc;
use rand::seq::SliceRandom;
use std::path::Path;
use tracing::{info, warn};

pub async fn handle_post(
    dry_run: bool,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let settings = Settings::load(config)?;
    let catalog = Catalog::load(None)?;
    let usable = usable_catalog(&catalog, &settings.images_dir);

    let state_path = settings.state_file();
    let _lock = StateLock::acquire(&state_path)?;
    let mut state = RotationState::load(&state_path);
    let mut rng = rand::thread_rng();

    let policy = QuotaPolicy {
        min_posts_per_day: settings.min_posts_per_day,
        max_posts_per_day: settings.max_posts_per_day,
        utc_offset_minutes: settings.utc_offset_minutes,
    };
    let allowed = should_post_today(&mut state, Utc::now(), &policy, &mut rng);

    // Persist a possible date-rollover reset before anything else happens,
    // even when the answer is "no post today".
    if let Err(err) = state.save(&state_path) {
        warn!(error = %err, "could not persist quota reset");
    }

    if !allowed {
        info!(
            sent = state.posts_sent_today,
            target = state.daily_target,
            "daily quota reached, nothing to do"
        );
        print_skip(&state, &format);
        return Ok(());
    }

    let combination = choose_combination(&mut state, &usable, &mut rng)?;
    let serial = state.next_serial();

    if dry_run {
        print_dry_run(&combination, serial, &state, &format);
        return Ok(());
    }

    // Fail fast on configuration problems before spending render time.
    let client = TelegramClient::from_env(settings.telegram_chat_id.as_deref())?;

    let category = catalog
        .find_category(&combination.category)
        .with_context(|| format!("Category '{}' vanished from catalog", combination.category))?;
    let color = category
        .colors
        .choose(&mut rng)
        .cloned()
        .unwrap_or_else(|| ColorPreset {
            name: "classic".to_string(),
            filter: String::new(),
        });

    let src = resolve_asset(&settings.images_dir, &combination.asset)
        .ok_or_else(|| AppError::AssetMissing(combination.asset.clone()))?;
    let out_path = settings
        .output_dir()
        .join(output_file_name(serial, &combination.category));

    compose_image(
        &src,
        &settings.logo_path,
        &out_path,
        &combination.variant,
        &combination.effect,
        &color.filter,
    )
    .await?;

    let hashtags = build_hashtags(&settings.hashtags, &mut rng);
    let caption = build_caption(category, &color.name, serial, &settings, &hashtags);

    client.send_photo(&out_path, &caption).await?;

    // Delivery succeeded: commit, then persist. A failed save is a warning,
    // not a rollback — the post is already out.
    state.record_post(&combination, serial, settings.history_cap);
    if let Err(err) = state.save(&state_path) {
        warn!(
            error = %err,
            "post delivered but state save failed; the next run will see stale counts"
        );
    }

    info!(
        serial = %format_serial(serial),
        category = %combination.category,
        sent = state.posts_sent_today,
        target = state.daily_target,
        "post delivered"
    );
    print_posted(&combination, serial, &color.name, &out_path, &state, &format);
    Ok(())
}

fn print_skip(state: &RotationState, format: &OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!(
                "Quota reached for today ({}/{}); no post sent.",
                state.posts_sent_today, state.daily_target
            );
        }
        OutputFormat::Json => {
            let out = serde_json::json!({
                "posted": false,
                "reason": "quota_reached",
                "posts_sent_today": state.posts_sent_today,
                "daily_target": state.daily_target,
            });
            println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
        }
    }
}

fn print_dry_run(
    combination: &Combination,
    serial: u32,
    state: &RotationState,
    format: &OutputFormat,
) {
    match format {
        OutputFormat::Text => {
            println!("Dry run — would post {}:", format_serial(serial));
            println!("  Category: {}", combination.category);
            println!("  Asset:    {}", combination.asset);
            println!("  Variant:  {}", combination.variant);
            println!("  Effect:   {}", combination.effect);
            println!(
                "  Quota:    {}/{} today",
                state.posts_sent_today, state.daily_target
            );
        }
        OutputFormat::Json => {
            let out = serde_json::json!({
                "posted": false,
                "dry_run": true,
                "serial": serial,
                "combination": combination,
                "posts_sent_today": state.posts_sent_today,
                "daily_target": state.daily_target,
            });
            println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
        }
    }
}

fn print_posted(
    combination: &Combination,
    serial: u32,
    color: &str,
    media: &Path,
    state: &RotationState,
    format: &OutputFormat,
) {
    match format {
        OutputFormat::Text => {
            println!(
                "Sent post {} for {} ({} | {} + {})",
                format_serial(serial),
                combination.category,
                color,
                combination.variant,
                combination.effect
            );
            println!("  Media: {}", media.display());
            println!(
                "  Quota: {}/{} today",
                state.posts_sent_today, state.daily_target
            );
        }
        OutputFormat::Json => {
            let out = serde_json::json!({
                "posted": true,
                "serial": serial,
                "combination": combination,
                "color": color,
                "media": media.display().to_string(),
                "posts_sent_today": state.posts_sent_today,
                "daily_target": state.daily_target,
            });
            println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
        }
    }
}
