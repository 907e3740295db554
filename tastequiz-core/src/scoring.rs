/// Result computation: normalization and explainability evidence.
///
/// Pure functions: the choice log and raw scores go in, an immutable result
/// comes out. Calling twice on the same input gives the same output.
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::constants::{EVIDENCE_LIMIT, SOFTMAX_TEMPERATURE};
use crate::error::TasteError;
use crate::types::{Evidence, PreferenceChoice, QuizResult, RawScores, StyleScore};

/// Temperature-scaled softmax. Returns an empty vector for empty input.
///
/// The maximum is subtracted before scaling, so any finite input stays finite
/// and all-equal inputs give a uniform distribution.
pub fn softmax(values: &[f64], temperature: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|v| ((v - max) / temperature).exp()).collect();
    let sum: f64 = exps.iter().sum();

    exps.into_iter().map(|e| e / sum).collect()
}

#[derive(Default)]
struct StyleTally {
    rated: usize,
    pos: Vec<Evidence>,
    neg: Vec<Evidence>,
}

/// Build the final result for `active_styles`.
///
/// Styles missing from `raw_scores` count as 0. Raw scores must be finite and
/// every style named in `history` must be in `active_styles`.
pub fn compute_result(
    active_styles: &[String],
    raw_scores: &RawScores,
    history: &[PreferenceChoice],
) -> Result<QuizResult, TasteError> {
    if active_styles.is_empty() {
        return Err(TasteError::EmptySelection);
    }

    let raw: Vec<f64> = active_styles
        .iter()
        .map(|s| raw_scores.get(s).copied().unwrap_or(0.0))
        .collect();
    if let Some((name, _)) = active_styles.iter().zip(&raw).find(|(_, v)| !v.is_finite()) {
        return Err(TasteError::NonFiniteScore(name.clone()));
    }
    let distribution = softmax(&raw, SOFTMAX_TEMPERATURE);

    let mut tallies: HashMap<&str, StyleTally> = active_styles
        .iter()
        .map(|s| (s.as_str(), StyleTally::default()))
        .collect();

    for choice in history {
        let winner = choice.winner();
        let loser = choice.loser();

        let tally = tallies
            .get_mut(winner.style.as_str())
            .ok_or_else(|| TasteError::UnknownStyle(winner.style.clone()))?;
        tally.rated += 1;
        tally.pos.push(Evidence {
            relative_path: winner.relative_path.clone(),
            delta: winner.quiz_weight,
        });

        let tally = tallies
            .get_mut(loser.style.as_str())
            .ok_or_else(|| TasteError::UnknownStyle(loser.style.clone()))?;
        tally.rated += 1;
        tally.neg.push(Evidence {
            relative_path: loser.relative_path.clone(),
            delta: -loser.quiz_weight,
        });
    }

    let mut styles: Vec<StyleScore> = active_styles
        .iter()
        .zip(raw.iter().zip(distribution.iter()))
        .map(|(name, (&raw, &score))| {
            let tally = tallies.remove(name.as_str()).unwrap_or_default();
            StyleScore {
                name: name.clone(),
                score,
                raw,
                rated: tally.rated,
                pos: top_evidence(tally.pos, |a, b| b.delta.partial_cmp(&a.delta)),
                neg: top_evidence(tally.neg, |a, b| a.delta.partial_cmp(&b.delta)),
            }
        })
        .collect();

    styles.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    Ok(QuizResult { styles })
}

/// Stable sort, then keep the first `EVIDENCE_LIMIT` entries.
fn top_evidence(
    mut entries: Vec<Evidence>,
    cmp: impl Fn(&Evidence, &Evidence) -> Option<Ordering>,
) -> Vec<Evidence> {
    entries.sort_by(|a, b| cmp(a, b).unwrap_or(Ordering::Equal));
    entries.truncate(EVIDENCE_LIMIT);
    entries
}
