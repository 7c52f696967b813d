//! The `doctor` command: check everything a scheduled run depends on.

use anyhow::Result;
use aurum_builder::usable_catalog;
use aurum_config::{Catalog, Settings};
use aurum_delivery::TelegramClient;
use aurum_rotation::RotationState;
use std::path::Path;

struct Check {
    name: &'static str,
    ok: bool,
    detail: String,
}

fn check(name: &'static str, result: std::result::Result<String, String>) -> Check {
    match result {
        Ok(detail) => Check {
            name,
            ok: true,
            detail,
        },
        Err(detail) => Check {
            name,
            ok: false,
            detail,
        },
    }
}

/// Run all environment checks. Returns `true` when every check passed.
pub fn run_doctor(config: Option<&Path>) -> Result<bool> {
    let mut checks = Vec::new();

    let settings = Settings::load(config);
    checks.push(check(
        "config",
        settings
            .as_ref()
            .map(|_| "parsed".to_string())
            .map_err(|e| format!("{e:#}")),
    ));

    let catalog = Catalog::load(None);
    checks.push(check(
        "catalog",
        catalog
            .as_ref()
            .map(|c| format!("{} categories", c.categories.len()))
            .map_err(|e| format!("{e:#}")),
    ));

    if let (Ok(settings), Ok(catalog)) = (&settings, &catalog) {
        let usable = usable_catalog(catalog, &settings.images_dir);
        let asset_count: usize = usable.categories.iter().map(|c| c.assets.len()).sum();
        checks.push(check(
            "assets",
            if asset_count > 0 {
                Ok(format!(
                    "{} assets under {}",
                    asset_count,
                    settings.images_dir.display()
                ))
            } else {
                Err(format!(
                    "no catalog assets found under {}",
                    settings.images_dir.display()
                ))
            },
        ));

        let state_path = settings.state_file();
        let state = RotationState::load(&state_path);
        checks.push(check(
            "state",
            Ok(if state_path.exists() {
                format!(
                    "{} (serial {:03})",
                    state_path.display(),
                    state.last_sequence_number
                )
            } else {
                format!("{} (fresh start)", state_path.display())
            }),
        ));

        checks.push(check(
            "credentials",
            TelegramClient::from_env(settings.telegram_chat_id.as_deref())
                .map(|_| "token and chat id present".to_string())
                .map_err(|e| e.to_string()),
        ));
    }

    checks.push(check(
        "ffmpeg",
        which::which("ffmpeg")
            .map(|p| p.display().to_string())
            .map_err(|_| "not found on PATH".to_string()),
    ));

    let mut all_ok = true;
    for c in &checks {
        let marker = if c.ok { "ok" } else { "FAIL" };
        println!("  [{marker}] {}: {}", c.name, c.detail);
        all_ok &= c.ok;
    }
    if all_ok {
        println!("All checks passed.");
    } else {
        println!("Some checks failed; `aurum post` will not work until they pass.");
    }
    Ok(all_ok)
}
