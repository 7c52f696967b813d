//! Persisted rotation state: load-or-default, atomic save, post recording.

use aurum_core::{AppError, Combination, next_serial_after};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// The single persisted record driving all posting decisions.
///
/// Loaded at the start of every invocation, mutated in memory, and written
/// back before exit. A missing or corrupt file never blocks posting — it
/// only makes the run behave like the first run ever.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationState {
    /// Local calendar date of the last quota reset. `None` before first run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reset_date: Option<NaiveDate>,

    /// Posts delivered so far during the current local day.
    pub posts_sent_today: u32,

    /// Today's quota, redrawn once per day from the configured range.
    pub daily_target: u32,

    /// Categories already posted today, insertion-ordered, no duplicates.
    pub used_categories_today: Vec<String>,

    /// Most-recent-N fully-qualified combination keys, oldest first.
    pub used_combination_history: Vec<String>,

    /// Serial of the last delivered post (1..=999, 0 before first post).
    pub last_sequence_number: u32,
}

impl RotationState {
    /// Load state from `path`, substituting defaults when the file is
    /// missing, unreadable, or malformed. Never fails.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no rotation state yet, starting fresh");
                return Self::default();
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "rotation state unreadable, starting fresh");
                return Self::default();
            }
        };
        match toml::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "rotation state malformed, starting fresh");
                Self::default()
            }
        }
    }

    /// Write state to `path` atomically: temp file in the same directory,
    /// then rename over the original. A crash mid-write leaves the previous
    /// valid state intact.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let to_save_err = |source: std::io::Error| AppError::StateSave {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(to_save_err)?;
        }

        let content = toml::to_string_pretty(self).map_err(|err| {
            to_save_err(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
        })?;

        let temp_path = path.with_extension("toml.tmp");
        std::fs::write(&temp_path, content).map_err(to_save_err)?;
        std::fs::rename(&temp_path, path).map_err(to_save_err)?;
        Ok(())
    }

    /// The serial the next post would carry. Does not mutate state; the
    /// caller commits it via [`RotationState::record_post`] only after a
    /// successful delivery.
    pub fn next_serial(&self) -> u32 {
        next_serial_after(self.last_sequence_number)
    }

    /// Commit a delivered post: bump today's count, remember the category
    /// and the combination key (evicting the oldest entries past
    /// `history_cap`), and advance the serial.
    ///
    /// Call only after the delivery step has succeeded.
    pub fn record_post(&mut self, combination: &Combination, serial: u32, history_cap: usize) {
        self.posts_sent_today += 1;
        if !self.used_categories_today.contains(&combination.category) {
            self.used_categories_today.push(combination.category.clone());
        }
        self.used_combination_history.push(combination.key());
        while self.used_combination_history.len() > history_cap {
            self.used_combination_history.remove(0);
        }
        self.last_sequence_number = serial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_combination() -> Combination {
        Combination {
            category: "Bandgala".into(),
            asset: "bandgala.jpg".into(),
            variant: "low_key".into(),
            effect: "none".into(),
        }
    }

    #[test]
    fn load_missing_file_yields_default() {
        let temp = tempfile::tempdir().unwrap();
        let state = RotationState::load(&temp.path().join("rotation.toml"));
        assert_eq!(state.posts_sent_today, 0);
        assert_eq!(state.last_sequence_number, 0);
        assert!(state.last_reset_date.is_none());
    }

    #[test]
    fn load_corrupt_file_yields_default() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("rotation.toml");
        std::fs::write(&path, "posts_sent_today = \"not a number\"").unwrap();
        let state = RotationState::load(&path);
        assert_eq!(state.posts_sent_today, 0);
    }

    #[test]
    fn load_unknown_keys_are_tolerated() {
        // Older revisions accreted extra keys; they must not break loading.
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("rotation.toml");
        std::fs::write(
            &path,
            "posts_sent_today = 3\ndaily_target = 5\nmale_count_today = 1\n",
        )
        .unwrap();
        let state = RotationState::load(&path);
        assert_eq!(state.posts_sent_today, 3);
        assert_eq!(state.daily_target, 5);
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("rotation.toml");

        let mut state = RotationState {
            last_reset_date: NaiveDate::from_ymd_opt(2025, 11, 3),
            posts_sent_today: 2,
            daily_target: 4,
            last_sequence_number: 41,
            ..Default::default()
        };
        state.used_categories_today.push("Sherwanis".into());
        state
            .used_combination_history
            .push("Sherwanis::sherwani.jpg::warm_tone::none".into());

        state.save(&path).unwrap();
        let loaded = RotationState::load(&path);

        assert_eq!(loaded.last_reset_date, state.last_reset_date);
        assert_eq!(loaded.posts_sent_today, 2);
        assert_eq!(loaded.daily_target, 4);
        assert_eq!(loaded.used_categories_today, state.used_categories_today);
        assert_eq!(
            loaded.used_combination_history,
            state.used_combination_history
        );
        assert_eq!(loaded.last_sequence_number, 41);
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("deep").join("nested").join("rotation.toml");
        RotationState::default().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("rotation.toml");
        RotationState::default().save(&path).unwrap();
        let entries: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("rotation.toml")]);
    }

    #[test]
    fn save_replaces_previous_content() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("rotation.toml");

        RotationState::default().save(&path).unwrap();
        let updated = RotationState {
            posts_sent_today: 9,
            ..Default::default()
        };
        updated.save(&path).unwrap();
        assert_eq!(RotationState::load(&path).posts_sent_today, 9);
    }

    #[test]
    fn next_serial_does_not_mutate() {
        let state = RotationState {
            last_sequence_number: 7,
            ..Default::default()
        };
        assert_eq!(state.next_serial(), 8);
        assert_eq!(state.next_serial(), 8);
        assert_eq!(state.last_sequence_number, 7);
    }

    #[test]
    fn next_serial_wraps_from_ceiling_to_one() {
        let state = RotationState {
            last_sequence_number: 999,
            ..Default::default()
        };
        assert_eq!(state.next_serial(), 1);
    }

    #[test]
    fn record_post_updates_all_fields() {
        let mut state = RotationState::default();
        let combo = sample_combination();

        state.record_post(&combo, 1, 48);

        assert_eq!(state.posts_sent_today, 1);
        assert_eq!(state.used_categories_today, vec!["Bandgala".to_string()]);
        assert_eq!(state.used_combination_history, vec![combo.key()]);
        assert_eq!(state.last_sequence_number, 1);
    }

    #[test]
    fn record_post_does_not_duplicate_category() {
        let mut state = RotationState::default();
        let mut combo = sample_combination();

        state.record_post(&combo, 1, 48);
        combo.variant = "high_key".into();
        state.record_post(&combo, 2, 48);

        assert_eq!(state.used_categories_today.len(), 1);
        assert_eq!(state.used_combination_history.len(), 2);
        assert_eq!(state.posts_sent_today, 2);
    }

    #[test]
    fn record_post_evicts_oldest_past_cap() {
        let mut state = RotationState::default();
        for i in 0..5u32 {
            let combo = Combination {
                category: format!("cat-{i}"),
                asset: "a.jpg".into(),
                variant: "none".into(),
                effect: "none".into(),
            };
            state.record_post(&combo, i + 1, 3);
        }
        assert_eq!(state.used_combination_history.len(), 3);
        // Oldest two entries evicted
        assert_eq!(
            state.used_combination_history[0],
            "cat-2::a.jpg::none::none"
        );
        assert_eq!(
            state.used_combination_history[2],
            "cat-4::a.jpg::none::none"
        );
    }
}
