//! The `status` command: a read-only glance at the rotation state.

use anyhow::Result;
use aurum_config::Settings;
use aurum_core::OutputFormat;
use aurum_rotation::{RotationState, local_date};
use chrono::Utc;
use std::path::Path;

pub fn handle_status(config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let settings = Settings::load(config)?;
    let state_path = settings.state_file();
    // Read-only: no lock, a concurrent post run at worst makes this stale.
    let state = RotationState::load(&state_path);

    let today = local_date(Utc::now(), settings.utc_offset_minutes);
    let date_current = state.last_reset_date == Some(today);
    let remaining = if date_current {
        state.daily_target.saturating_sub(state.posts_sent_today)
    } else {
        // Counters reset on the next post run
        0
    };

    match format {
        OutputFormat::Text => {
            println!("State file: {}", state_path.display());
            match state.last_reset_date {
                Some(date) if date_current => {
                    println!(
                        "Today ({}): {}/{} posts sent, {} remaining",
                        date, state.posts_sent_today, state.daily_target, remaining
                    );
                }
                Some(date) => {
                    println!(
                        "Last active day: {} ({}/{} posts); counters reset on next run",
                        date, state.posts_sent_today, state.daily_target
                    );
                }
                None => {
                    println!("No posts recorded yet (fresh state).");
                }
            }
            println!(
                "Categories used today: {}",
                if state.used_categories_today.is_empty() {
                    "none".to_string()
                } else {
                    state.used_categories_today.join(", ")
                }
            );
            println!(
                "Recent combinations remembered: {}",
                state.used_combination_history.len()
            );
            println!("Last serial: {:03}", state.last_sequence_number);
        }
        OutputFormat::Json => {
            let out = serde_json::json!({
                "state_file": state_path.display().to_string(),
                "last_reset_date": state.last_reset_date,
                "date_current": date_current,
                "posts_sent_today": state.posts_sent_today,
                "daily_target": state.daily_target,
                "remaining_today": remaining,
                "used_categories_today": state.used_categories_today,
                "history_len": state.used_combination_history.len(),
                "last_sequence_number": state.last_sequence_number,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
