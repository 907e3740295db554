use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::TasteError;

/// One image in the quiz manifest.
///
/// The quality scores are precomputed upstream and only carried through;
/// `quiz_weight` is what moves a style's score when the image wins or loses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuizImage {
    /// Path relative to the image root. Unique within a manifest.
    #[cfg_attr(feature = "serde", serde(rename = "relativePath"))]
    pub relative_path: String,
    pub embedding_index: i64,
    /// Representativeness score.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rep_score: f64,
    /// Discriminativeness score.
    #[cfg_attr(feature = "serde", serde(default))]
    pub disc_score: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub quiz_weight: f64,
}

/// A named group of images sharing an art-historical style.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleBlock {
    pub name: String,
    pub images: Vec<QuizImage>,
}

/// Input document: every style the quiz can draw from.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Manifest {
    pub styles: Vec<StyleBlock>,
}

impl Manifest {
    /// All style names, sorted.
    pub fn style_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.styles.iter().map(|s| s.name.clone()).collect();
        names.sort();
        names
    }
}

/// Per-style images ordered by descending quiz weight.
///
/// Built once per manifest and read by pair sampling. Ties keep manifest order.
#[derive(Debug, Clone, Default)]
pub struct StyleCatalog {
    by_style: BTreeMap<String, Vec<QuizImage>>,
}

impl StyleCatalog {
    /// Index `manifest` by style.
    ///
    /// Rejects repeated style names and any quiz weight that is negative or
    /// not finite.
    pub fn from_manifest(manifest: &Manifest) -> Result<Self, TasteError> {
        let mut by_style = BTreeMap::new();
        for block in &manifest.styles {
            if let Some(bad) = block
                .images
                .iter()
                .find(|i| !(i.quiz_weight >= 0.0 && i.quiz_weight.is_finite()))
            {
                return Err(TasteError::InvalidWeight {
                    style: block.name.clone(),
                    path: bad.relative_path.clone(),
                    weight: bad.quiz_weight,
                });
            }
            let mut images = block.images.clone();
            images.sort_by(|a, b| {
                b.quiz_weight
                    .partial_cmp(&a.quiz_weight)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            if by_style.insert(block.name.clone(), images).is_some() {
                return Err(TasteError::DuplicateStyle(block.name.clone()));
            }
        }
        Ok(StyleCatalog { by_style })
    }

    pub fn contains(&self, style: &str) -> bool {
        self.by_style.contains_key(style)
    }

    /// Images for `style`, best quiz weight first. `None` for unknown styles.
    pub fn images(&self, style: &str) -> Option<&[QuizImage]> {
        self.by_style.get(style).map(Vec::as_slice)
    }

    /// All style names, sorted.
    pub fn style_names(&self) -> Vec<String> {
        self.by_style.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.by_style.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_style.is_empty()
    }

    /// Check that `styles` is a usable active selection: non-empty, no
    /// duplicates, every style known and holding at least one image.
    pub fn validate_selection(&self, styles: &[String]) -> Result<(), TasteError> {
        if styles.is_empty() {
            return Err(TasteError::EmptySelection);
        }
        let mut seen = HashSet::with_capacity(styles.len());
        for style in styles {
            if !seen.insert(style.as_str()) {
                return Err(TasteError::DuplicateStyle(style.clone()));
            }
            match self.images(style) {
                None => return Err(TasteError::UnknownStyle(style.clone())),
                Some([]) => return Err(TasteError::NoImages(style.clone())),
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Which of the two shown images the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// One side of a sampled comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub style: String,
    pub image: QuizImage,
}

/// Two candidates shown side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub left: Candidate,
    pub right: Candidate,
}

impl Pair {
    pub fn side(&self, side: Side) -> &Candidate {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// What gets recorded about one side of a comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoiceSide {
    pub style: String,
    pub embedding_index: i64,
    #[cfg_attr(feature = "serde", serde(rename = "relativePath"))]
    pub relative_path: String,
    pub quiz_weight: f64,
}

impl From<&Candidate> for ChoiceSide {
    fn from(c: &Candidate) -> Self {
        ChoiceSide {
            style: c.style.clone(),
            embedding_index: c.image.embedding_index,
            relative_path: c.image.relative_path.clone(),
            quiz_weight: c.image.quiz_weight,
        }
    }
}

/// Immutable record of one answered comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceChoice {
    /// Zero-based sequence index within the session.
    pub q: usize,
    pub left: ChoiceSide,
    pub right: ChoiceSide,
    pub picked: Side,
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
}

impl PreferenceChoice {
    pub fn winner(&self) -> &ChoiceSide {
        match self.picked {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn loser(&self) -> &ChoiceSide {
        match self.picked {
            Side::Left => &self.right,
            Side::Right => &self.left,
        }
    }
}

/// Running per-style score, keyed by style name.
pub type RawScores = BTreeMap<String, f64>;

/// The score movement caused by one choice. `Display` gives the feedback line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreDelta {
    pub winner_style: String,
    pub winner_weight: f64,
    pub loser_style: String,
    pub loser_weight: f64,
}

impl fmt::Display for ScoreDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Selection updated style scores: +{} ({:.2}), −{} ({:.2}).",
            self.winner_style, self.winner_weight, self.loser_style, self.loser_weight,
        )
    }
}

/// A single comparison that pushed a style's score up or down.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evidence {
    #[cfg_attr(feature = "serde", serde(rename = "rel"))]
    pub relative_path: String,
    /// `+quiz_weight` for a win, `-quiz_weight` for a loss.
    pub delta: f64,
}

/// Final numbers for one style.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleScore {
    pub name: String,
    /// Softmax-normalized share, in [0, 1].
    pub score: f64,
    pub raw: f64,
    /// Comparisons involving this style, wins plus losses.
    pub rated: usize,
    pub pos: Vec<Evidence>,
    pub neg: Vec<Evidence>,
}

/// Read-only result of a session, sorted by descending normalized score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuizResult {
    pub styles: Vec<StyleScore>,
}

impl QuizResult {
    pub fn get(&self, name: &str) -> Option<&StyleScore> {
        self.styles.iter().find(|s| s.name == name)
    }

    pub fn top(&self) -> Option<&StyleScore> {
        self.styles.first()
    }
}
