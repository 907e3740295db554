/// Manifest loading.
///
/// The manifest is read once per run and handed to the engine as a catalog.
use std::path::Path;

use tastequiz_core::{Manifest, StyleCatalog};

use crate::bail;

pub fn parse_manifest(content: &str) -> Result<Manifest, serde_json::Error> {
    serde_json::from_str(content)
}

/// Read and parse the manifest at `path`, then build its style catalog.
pub fn load_catalog(path: &Path) -> StyleCatalog {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read manifest {}: {e}", path.display())));
    let manifest = parse_manifest(&content)
        .unwrap_or_else(|e| bail(format!("Failed to parse manifest {}: {e}", path.display())));

    if manifest.styles.is_empty() {
        bail(format!("Manifest {} has no styles", path.display()));
    }

    let catalog = StyleCatalog::from_manifest(&manifest)
        .unwrap_or_else(|e| bail(format!("Invalid manifest {}: {e}", path.display())));

    tracing::debug!(
        path = %path.display(),
        styles = manifest.styles.len(),
        images = manifest.styles.iter().map(|s| s.images.len()).sum::<usize>(),
        "manifest loaded"
    );

    catalog
}

/// Resolve user-typed style names against the catalog, case-insensitively.
/// Returns the catalog spelling, or the input unchanged when nothing matches
/// so the engine can report it as unknown.
pub fn resolve_styles(catalog: &StyleCatalog, requested: &[String]) -> Vec<String> {
    let known = catalog.style_names();
    requested
        .iter()
        .map(|r| {
            let wanted = r.trim();
            known
                .iter()
                .find(|k| k.eq_ignore_ascii_case(wanted))
                .cloned()
                .unwrap_or_else(|| wanted.to_string())
        })
        .collect()
}
