/// tastequiz-core: Pure-computation taste scoring engine.
///
/// Pairwise image picks → per-style raw scores → softmax distribution with
/// explainability evidence. No IO, no HTTP, no filesystem. The caller loads
/// the manifest, shows the pairs, and stores the result.
///
/// # Quick start
///
/// ```rust
/// use tastequiz_core::{Level, Manifest, QuizImage, Side, StyleBlock, StyleCatalog, TasteSession};
///
/// let image = |path: &str, w: f64| QuizImage {
///     relative_path: path.to_string(),
///     embedding_index: 0,
///     rep_score: 0.0,
///     disc_score: 0.0,
///     quiz_weight: w,
/// };
/// let manifest = Manifest {
///     styles: vec![
///         StyleBlock { name: "Impressionism".into(), images: vec![image("imp/1.jpg", 1.0)] },
///         StyleBlock { name: "Cubism".into(), images: vec![image("cub/1.jpg", 0.5)] },
///     ],
/// };
///
/// let catalog = StyleCatalog::from_manifest(&manifest)?;
/// let picked = vec!["Impressionism".to_string(), "Cubism".to_string()];
/// let mut session = TasteSession::new(catalog, Level::Quick, Some(picked.as_slice()))?;
///
/// while !session.is_complete() {
///     let pair = session.next_pair()?;
///     let side = if pair.left.style == "Impressionism" { Side::Left } else { Side::Right };
///     println!("{}", session.apply_choice(side)?);
/// }
///
/// for style in &session.result()?.styles {
///     println!("{}: {:.3} (raw {:+.2})", style.name, style.score, style.raw);
/// }
/// # Ok::<(), tastequiz_core::TasteError>(())
/// ```

pub mod constants;
pub mod engine;
pub mod error;
pub mod level;
pub mod sampling;
pub mod scoring;
pub mod types;

// Re-export primary public API at crate root.
pub use engine::TasteSession;
pub use error::TasteError;
pub use level::{session_status, Level, LevelConfig, SessionStatus, StylePickRule};
pub use sampling::{bucket_size, sample_pair, sample_pair_with_rng};
pub use scoring::{compute_result, softmax};
pub use types::{
    Candidate, ChoiceSide, Evidence, Manifest, Pair, PreferenceChoice, QuizImage, QuizResult,
    RawScores, ScoreDelta, Side, StyleBlock, StyleCatalog, StyleScore,
};
