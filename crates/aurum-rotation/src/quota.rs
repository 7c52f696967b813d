//! Daily quota gate: date rollover detection and the post/no-post decision.

use crate::state::RotationState;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rand::Rng;
use tracing::debug;

/// Quota configuration, taken from settings.
#[derive(Debug, Clone)]
pub struct QuotaPolicy {
    /// Inclusive lower bound of the daily target draw.
    pub min_posts_per_day: u32,
    /// Inclusive upper bound of the daily target draw.
    pub max_posts_per_day: u32,
    /// Fixed offset from UTC, in minutes, defining the local day.
    pub utc_offset_minutes: i32,
}

/// Local calendar date of `now` under a fixed UTC offset.
pub fn local_date(now: DateTime<Utc>, utc_offset_minutes: i32) -> NaiveDate {
    let offset = FixedOffset::east_opt(utc_offset_minutes * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
    now.with_timezone(&offset).date_naive()
}

/// Decide whether another post may be sent today.
///
/// On the first call after a local-date change this resets the daily
/// counters (`posts_sent_today`, `used_categories_today`) and redraws
/// `daily_target` from the configured range; repeated calls on the same
/// date change nothing. The caller must persist the state even when the
/// answer is `false`, so a reset observed without a subsequent post still
/// reaches disk.
pub fn should_post_today(
    state: &mut RotationState,
    now: DateTime<Utc>,
    policy: &QuotaPolicy,
    rng: &mut impl Rng,
) -> bool {
    let today = local_date(now, policy.utc_offset_minutes);

    if state.last_reset_date != Some(today) {
        state.last_reset_date = Some(today);
        state.posts_sent_today = 0;
        state.used_categories_today.clear();
        state.daily_target = rng.gen_range(policy.min_posts_per_day..=policy.max_posts_per_day);
        debug!(
            date = %today,
            target = state.daily_target,
            "daily counters reset"
        );
    }

    state.posts_sent_today < state.daily_target
}
