//! Asset resolution under the images root.

use aurum_config::Catalog;
use aurum_rotation::{SelectionCatalog, SelectionCategory};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a catalog asset name to an on-disk path.
///
/// - absolute paths pass through when they exist;
/// - names containing a separator resolve relative to the images root;
/// - bare file names resolve under `<images root>/services`.
///
/// Returns `None` when the file does not exist.
pub fn resolve_asset(images_root: &Path, name: &str) -> Option<PathBuf> {
    let raw = Path::new(name);
    if raw.is_absolute() {
        return raw.exists().then(|| raw.to_path_buf());
    }

    let candidate = if name.contains('/') {
        images_root.join(name)
    } else {
        images_root.join("services").join(name)
    };
    candidate.exists().then_some(candidate)
}

/// Project the configured catalog onto what is actually present on disk.
///
/// Category order is preserved; assets that do not resolve are dropped.
/// Categories may end up with zero assets — selection treats those as
/// ineligible rather than failing the whole catalog.
pub fn usable_catalog(catalog: &Catalog, images_root: &Path) -> SelectionCatalog {
    let categories = catalog
        .categories
        .iter()
        .map(|cat| {
            let assets: Vec<String> = cat
                .files
                .iter()
                .filter(|name| {
                    let found = resolve_asset(images_root, name).is_some();
                    if !found {
                        debug!(category = %cat.name, asset = %name, "asset missing, skipping");
                    }
                    found
                })
                .cloned()
                .collect();
            SelectionCategory {
                name: cat.name.clone(),
                assets,
            }
        })
        .collect();

    SelectionCatalog {
        categories,
        variants: catalog.variants.clone(),
        effects: catalog.effects.clone(),
    }
}
