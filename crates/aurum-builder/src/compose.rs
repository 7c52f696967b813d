//! Image composition by spawning ffmpeg.

use crate::filters::{OUT_LABEL, build_filter_complex};
use anyhow::{Context, Result};
use aurum_core::{AppError, format_serial};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Output file name for a composed post: `042_bespoke_suits.jpg`.
pub fn output_file_name(serial: u32, category: &str) -> String {
    let slug = category
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>();
    format!("{}_{}.jpg", format_serial(serial), slug)
}

/// Argument list for the single-frame composition run.
fn ffmpeg_args(src: &Path, logo: &Path, out: &Path, filter_complex: &str) -> Vec<String> {
    vec![
        "-y".into(),
        "-loglevel".into(),
        "error".into(),
        "-i".into(),
        src.display().to_string(),
        "-i".into(),
        logo.display().to_string(),
        "-filter_complex".into(),
        filter_complex.into(),
        "-map".into(),
        format!("[{OUT_LABEL}]"),
        "-frames:v".into(),
        "1".into(),
        "-q:v".into(),
        "3".into(),
        out.display().to_string(),
    ]
}

/// Compose the watermarked post image from `src` into `out`.
///
/// Fails with [`AppError::FfmpegNotInstalled`] when ffmpeg is not on PATH
/// and [`AppError::FfmpegFailed`] when the render exits non-zero. Either
/// way the current run must abort without recording a post.
pub async fn compose_image(
    src: &Path,
    logo: &Path,
    out: &Path,
    variant: &str,
    effect: &str,
    color_filter: &str,
) -> Result<()> {
    let ffmpeg = which::which("ffmpeg").map_err(|_| AppError::FfmpegNotInstalled)?;

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let filter_complex = build_filter_complex(variant, effect, color_filter);
    let args = ffmpeg_args(src, logo, out, &filter_complex);
    debug!(src = %src.display(), out = %out.display(), variant, effect, "composing image");

    let output = Command::new(ffmpeg)
        .args(&args)
        .output()
        .await
        .context("Failed to spawn ffmpeg")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(AppError::FfmpegFailed {
            status: output.status.code().unwrap_or(-1),
            stderr,
        }
        .into());
    }
    Ok(())
}
