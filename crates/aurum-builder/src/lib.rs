//! Post builder: resolves assets, composes the watermarked image via
//! ffmpeg, and assembles the caption with hashtags.

pub mod assets;
pub mod caption;
pub mod compose;
pub mod filters;

pub use assets::{resolve_asset, usable_catalog};
pub use caption::{build_caption, build_hashtags};
pub use compose::{compose_image, output_file_name};
