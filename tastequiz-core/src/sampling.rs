/// Pair sampling for the comparison phase.
///
/// Two styles are drawn uniformly from the active selection, then one image
/// per style is drawn uniformly from that style's top images by quiz weight.
/// Restricting the draw to the best-weighted images keeps each comparison
/// informative; drawing randomly within the bucket keeps sessions varied.
use rand::Rng;

use crate::constants::{DISTINCT_PAIR_RETRIES, MAX_BUCKET_SIZE, MIN_BUCKET_SIZE};
use crate::error::TasteError;
use crate::types::{Candidate, Pair, StyleCatalog};

/// Sample one comparison from `active_styles` using the thread RNG.
pub fn sample_pair(active_styles: &[String], catalog: &StyleCatalog) -> Result<Pair, TasteError> {
    sample_pair_with_rng(active_styles, catalog, &mut rand::rng())
}

/// Sample one comparison with a caller-supplied RNG.
///
/// With a single active style both sides come from it. Fails if either drawn
/// style is unknown to the catalog or has no images.
pub fn sample_pair_with_rng<R: Rng + ?Sized>(
    active_styles: &[String],
    catalog: &StyleCatalog,
    rng: &mut R,
) -> Result<Pair, TasteError> {
    if active_styles.is_empty() {
        return Err(TasteError::EmptySelection);
    }

    let (left_idx, right_idx) = if active_styles.len() >= 2 {
        distinct_pair(active_styles.len(), rng)
    } else {
        (0, 0)
    };

    let left = sample_candidate(&active_styles[left_idx], catalog, rng)?;
    let right = sample_candidate(&active_styles[right_idx], catalog, rng)?;

    Ok(Pair { left, right })
}

/// Number of top-weighted images a style's draw is restricted to.
pub fn bucket_size(available: usize) -> usize {
    MAX_BUCKET_SIZE
        .min(available)
        .clamp(MIN_BUCKET_SIZE, MAX_BUCKET_SIZE)
        .min(available)
}

/// Two indices in `0..len`, re-drawing the second a bounded number of times
/// while it collides with the first.
fn distinct_pair<R: Rng + ?Sized>(len: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..len);
    let mut b = rng.random_range(0..len);
    let mut attempts = 0;
    while b == a && attempts < DISTINCT_PAIR_RETRIES {
        b = rng.random_range(0..len);
        attempts += 1;
    }
    (a, b)
}

fn sample_candidate<R: Rng + ?Sized>(
    style: &str,
    catalog: &StyleCatalog,
    rng: &mut R,
) -> Result<Candidate, TasteError> {
    let images = catalog
        .images(style)
        .ok_or_else(|| TasteError::UnknownStyle(style.to_string()))?;

    if images.is_empty() {
        return Err(TasteError::NoImages(style.to_string()));
    }

    let bucket = &images[..bucket_size(images.len())];
    let image = bucket[rng.random_range(0..bucket.len())].clone();

    Ok(Candidate {
        style: style.to_string(),
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Manifest, QuizImage, StyleBlock};
    use rand::{rngs::SmallRng, SeedableRng};
    use std::collections::HashSet;

    fn block(name: &str, count: usize) -> StyleBlock {
        StyleBlock {
            name: name.to_string(),
            images: (0..count)
                .map(|i| QuizImage {
                    relative_path: format!("{name}/{i}.jpg"),
                    embedding_index: i as i64,
                    rep_score: 0.5,
                    disc_score: 0.5,
                    // Image 0 has the highest weight, image count-1 the lowest.
                    quiz_weight: 1.0 - i as f64 / count.max(1) as f64,
                })
                .collect(),
        }
    }

    fn catalog(blocks: Vec<StyleBlock>) -> StyleCatalog {
        StyleCatalog::from_manifest(&Manifest { styles: blocks }).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bucket_size() {
        assert_eq!(bucket_size(0), 0);
        assert_eq!(bucket_size(1), 1);
        assert_eq!(bucket_size(3), 3);
        assert_eq!(bucket_size(4), 4);
        assert_eq!(bucket_size(9), 9);
        assert_eq!(bucket_size(12), 12);
        assert_eq!(bucket_size(50), 12);
    }

    #[test]
    fn test_single_style_self_comparison() {
        let catalog = catalog(vec![block("Cubism", 3)]);
        let mut rng = SmallRng::seed_from_u64(7);
        let pair = sample_pair_with_rng(&names(&["Cubism"]), &catalog, &mut rng).unwrap();
        assert_eq!(pair.left.style, "Cubism");
        assert_eq!(pair.right.style, "Cubism");
    }

    #[test]
    fn test_two_styles_are_distinct_almost_always() {
        let catalog = catalog(vec![block("Cubism", 5), block("Baroque", 5)]);
        let active = names(&["Cubism", "Baroque"]);
        let mut rng = SmallRng::seed_from_u64(42);

        // A collision needs 12 identical draws in a row: 2^-11 per pair.
        let mut same = 0;
        for _ in 0..200 {
            let pair = sample_pair_with_rng(&active, &catalog, &mut rng).unwrap();
            if pair.left.style == pair.right.style {
                same += 1;
            }
        }
        assert!(same <= 2, "{same} self-comparisons out of 200");
    }

    #[test]
    fn test_draws_stay_within_top_bucket() {
        let catalog = catalog(vec![block("Cubism", 30)]);
        let active = names(&["Cubism"]);
        let allowed: HashSet<String> = catalog.images("Cubism").unwrap()[..MAX_BUCKET_SIZE]
            .iter()
            .map(|i| i.relative_path.clone())
            .collect();

        let mut rng = SmallRng::seed_from_u64(3);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let pair = sample_pair_with_rng(&active, &catalog, &mut rng).unwrap();
            for c in [&pair.left, &pair.right] {
                assert!(allowed.contains(&c.image.relative_path), "{} outside bucket", c.image.relative_path);
                seen.insert(c.image.relative_path.clone());
            }
        }
        assert_eq!(seen.len(), MAX_BUCKET_SIZE);
    }

    #[test]
    fn test_style_without_images_is_refused() {
        let catalog = catalog(vec![block("Cubism", 2), block("Baroque", 0)]);
        let mut rng = SmallRng::seed_from_u64(1);
        let err = sample_pair_with_rng(&names(&["Baroque"]), &catalog, &mut rng).unwrap_err();
        assert_eq!(err, TasteError::NoImages("Baroque".to_string()));
    }

    #[test]
    fn test_unknown_style_and_empty_selection() {
        let catalog = catalog(vec![block("Cubism", 2)]);
        assert_eq!(
            sample_pair(&names(&["Dada"]), &catalog).unwrap_err(),
            TasteError::UnknownStyle("Dada".to_string()),
        );
        assert_eq!(sample_pair(&[], &catalog).unwrap_err(), TasteError::EmptySelection);
    }
}
