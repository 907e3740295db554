use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use tastequiz_core::constants::{EVIDENCE_LIMIT, SOFTMAX_TEMPERATURE};
use tastequiz_core::{
    compute_result, sample_pair_with_rng, softmax, ChoiceSide, Level, Manifest, PreferenceChoice,
    QuizImage, RawScores, Side, StyleBlock, StyleCatalog, TasteSession,
};

fn style_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("style-{i}")).collect()
}

fn manifest(n_styles: usize, images_per_style: usize) -> Manifest {
    Manifest {
        styles: style_names(n_styles)
            .into_iter()
            .map(|name| StyleBlock {
                images: (0..images_per_style)
                    .map(|i| QuizImage {
                        relative_path: format!("{name}/{i}.jpg"),
                        embedding_index: i as i64,
                        rep_score: 0.5,
                        disc_score: 0.5,
                        quiz_weight: 0.1 + (i % 7) as f64 * 0.13,
                    })
                    .collect(),
                name,
            })
            .collect(),
    }
}

/// Random history over `styles`, built straight from the sampler.
fn random_history(styles: &[String], catalog: &StyleCatalog, n: usize, seed: u64) -> Vec<PreferenceChoice> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|q| {
            let pair = sample_pair_with_rng(styles, catalog, &mut rng).unwrap();
            PreferenceChoice {
                q,
                left: ChoiceSide::from(&pair.left),
                right: ChoiceSide::from(&pair.right),
                picked: if rng.random::<bool>() { Side::Left } else { Side::Right },
                ts: q as i64,
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn pt_distribution_sums_to_one(raw in prop::collection::vec(-50.0_f64..50.0, 1..12)) {
        let styles = style_names(raw.len());
        let scores: RawScores = styles.iter().cloned().zip(raw.iter().copied()).collect();
        let result = compute_result(&styles, &scores, &[]).unwrap();
        let sum: f64 = result.styles.iter().map(|s| s.score).sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pt_softmax_is_monotone(raw in prop::collection::vec(-20.0_f64..20.0, 2..10)) {
        let p = softmax(&raw, SOFTMAX_TEMPERATURE);
        for i in 0..raw.len() {
            for j in 0..raw.len() {
                if raw[i] > raw[j] {
                    prop_assert!(p[i] >= p[j]);
                }
            }
        }
    }

    #[test]
    fn pt_result_sorted_by_descending_score(raw in prop::collection::vec(-5.0_f64..5.0, 1..10)) {
        let styles = style_names(raw.len());
        let scores: RawScores = styles.iter().cloned().zip(raw.iter().copied()).collect();
        let result = compute_result(&styles, &scores, &[]).unwrap();
        for w in result.styles.windows(2) {
            prop_assert!(w[0].score >= w[1].score);
        }
    }

    #[test]
    fn pt_each_choice_touches_two_styles(n_styles in 1_usize..6, n in 0_usize..60, seed in any::<u64>()) {
        let catalog = StyleCatalog::from_manifest(&manifest(n_styles, 8)).unwrap();
        let styles = style_names(n_styles);
        let history = random_history(&styles, &catalog, n, seed);

        let result = compute_result(&styles, &RawScores::new(), &history).unwrap();
        let rated: usize = result.styles.iter().map(|s| s.rated).sum();
        prop_assert_eq!(rated, 2 * n);
    }

    #[test]
    fn pt_compute_result_is_repeatable(n_styles in 1_usize..6, n in 0_usize..40, seed in any::<u64>()) {
        let catalog = StyleCatalog::from_manifest(&manifest(n_styles, 5)).unwrap();
        let styles = style_names(n_styles);
        let history = random_history(&styles, &catalog, n, seed);
        let mut raw = RawScores::new();
        for c in &history {
            *raw.entry(c.winner().style.clone()).or_insert(0.0) += c.winner().quiz_weight;
            *raw.entry(c.loser().style.clone()).or_insert(0.0) -= c.loser().quiz_weight;
        }

        let first = compute_result(&styles, &raw, &history).unwrap();
        let second = compute_result(&styles, &raw, &history).unwrap();
        prop_assert_eq!(&first, &second);
        for (a, b) in first.styles.iter().zip(second.styles.iter()) {
            prop_assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }

    #[test]
    fn pt_evidence_capped_and_ordered(n_styles in 1_usize..4, n in 0_usize..80, seed in any::<u64>()) {
        let catalog = StyleCatalog::from_manifest(&manifest(n_styles, 12)).unwrap();
        let styles = style_names(n_styles);
        let history = random_history(&styles, &catalog, n, seed);
        let result = compute_result(&styles, &RawScores::new(), &history).unwrap();

        for s in &result.styles {
            prop_assert!(s.pos.len() <= EVIDENCE_LIMIT);
            prop_assert!(s.neg.len() <= EVIDENCE_LIMIT);
            prop_assert!(s.pos.windows(2).all(|w| w[0].delta >= w[1].delta));
            prop_assert!(s.neg.windows(2).all(|w| w[0].delta <= w[1].delta));

            // The kept positives are the largest of all of this style's wins.
            let mut wins: Vec<f64> = history.iter()
                .filter(|c| c.winner().style == s.name)
                .map(|c| c.winner().quiz_weight)
                .collect();
            wins.sort_by(|a, b| b.partial_cmp(a).unwrap());
            wins.truncate(EVIDENCE_LIMIT);
            let kept: Vec<f64> = s.pos.iter().map(|e| e.delta).collect();
            prop_assert_eq!(kept, wins);
        }
    }

    #[test]
    fn pt_session_scores_match_history(seed in any::<u64>()) {
        let catalog = StyleCatalog::from_manifest(&manifest(5, 10)).unwrap();
        let mut session = TasteSession::new(catalog, Level::Advanced, None).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);

        while !session.is_complete() {
            session.next_pair_with_rng(&mut rng).unwrap();
            let side = if rng.random::<bool>() { Side::Left } else { Side::Right };
            session.apply_choice_at(side, 0).unwrap();
        }

        prop_assert_eq!(session.choice_count(), Level::Advanced.config().target);
        prop_assert_eq!(session.raw_scores().len(), 5);

        let mut expected = RawScores::new();
        for c in session.history() {
            *expected.entry(c.winner().style.clone()).or_insert(0.0) += c.winner().quiz_weight;
            *expected.entry(c.loser().style.clone()).or_insert(0.0) -= c.loser().quiz_weight;
        }
        for (style, value) in session.raw_scores() {
            let want = expected.get(style).copied().unwrap_or(0.0);
            prop_assert!((value - want).abs() < 1e-9);
        }
    }
}

#[test]
fn single_style_session_compares_against_itself() {
    let catalog = StyleCatalog::from_manifest(&manifest(1, 3)).unwrap();
    let picked = style_names(1);
    let mut session = TasteSession::new(catalog, Level::Advanced, Some(picked.as_slice())).unwrap();
    let pair = session.next_pair().unwrap();
    assert_eq!(pair.left.style, "style-0");
    assert_eq!(pair.right.style, "style-0");
}
