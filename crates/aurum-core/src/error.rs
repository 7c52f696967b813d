#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Catalog has no usable assets")]
    EmptyCatalog,

    #[error("Failed to write rotation state to {path}: {source}")]
    StateSave {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Asset '{0}' not found under the images root")]
    AssetMissing(String),

    #[error("ffmpeg is not installed or not on PATH")]
    FfmpegNotInstalled,

    #[error("ffmpeg exited with status {status}: {stderr}")]
    FfmpegFailed { status: i32, stderr: String },

    #[error("Telegram API error {status}: {body}")]
    DeliveryFailed { status: u16, body: String },

    #[error("Missing credential '{0}' in environment")]
    MissingCredential(&'static str),
}
