/// Taste quiz session.
///
/// Pure computation: the caller shows each sampled pair to the user, then
/// feeds the pick back. The session owns its raw scores and its append-only
/// choice log; nothing is shared between sessions.
use rand::Rng;
use tracing::{debug, info};

use crate::error::TasteError;
use crate::level::{session_status, Level, SessionStatus};
use crate::sampling::sample_pair_with_rng;
use crate::scoring::compute_result;
use crate::types::{
    ChoiceSide, Pair, PreferenceChoice, QuizResult, RawScores, ScoreDelta, Side, StyleCatalog,
};

pub struct TasteSession {
    catalog: StyleCatalog,
    level: Level,

    /// Styles in play, in the order they were picked (or sorted, when all styles are in play).
    active_styles: Vec<String>,
    /// One entry per active style, nothing else.
    raw_scores: RawScores,
    /// Every answered comparison, in order.
    history: Vec<PreferenceChoice>,

    /// Pair shown to the user and not yet answered.
    current_pair: Option<Pair>,
    finish_requested: bool,

    /// Filled on first `result()` call after completion.
    result: Option<QuizResult>,
}

impl TasteSession {
    /// Start a session at `level`.
    ///
    /// `preselected` is the user's style pick, checked against the level's
    /// pick rule. `None` puts every catalog style in play.
    pub fn new(
        catalog: StyleCatalog,
        level: Level,
        preselected: Option<&[String]>,
    ) -> Result<Self, TasteError> {
        let active = match preselected {
            Some(styles) => {
                check_pick_rule(level, styles)?;
                styles.to_vec()
            }
            None => catalog.style_names(),
        };

        let mut session = TasteSession {
            catalog,
            level,
            active_styles: Vec::new(),
            raw_scores: RawScores::new(),
            history: Vec::new(),
            current_pair: None,
            finish_requested: false,
            result: None,
        };
        session.start(active)?;
        Ok(session)
    }

    /// Put `active_styles` in play with zeroed scores and an empty history.
    ///
    /// The selection must satisfy the level's pick rule. On error the session
    /// is left untouched.
    pub fn reset(&mut self, active_styles: Vec<String>) -> Result<(), TasteError> {
        check_pick_rule(self.level, &active_styles)?;
        self.start(active_styles)
    }

    fn start(&mut self, active_styles: Vec<String>) -> Result<(), TasteError> {
        self.catalog.validate_selection(&active_styles)?;

        self.raw_scores = active_styles.iter().map(|s| (s.clone(), 0.0)).collect();
        self.active_styles = active_styles;
        self.history.clear();
        self.current_pair = None;
        self.finish_requested = false;
        self.result = None;

        info!(
            level = %self.level,
            styles = self.active_styles.len(),
            target = self.level.config().target,
            "taste session started"
        );
        Ok(())
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn active_styles(&self) -> &[String] {
        &self.active_styles
    }

    pub fn raw_scores(&self) -> &RawScores {
        &self.raw_scores
    }

    pub fn history(&self) -> &[PreferenceChoice] {
        &self.history
    }

    pub fn choice_count(&self) -> usize {
        self.history.len()
    }

    pub fn current_pair(&self) -> Option<&Pair> {
        self.current_pair.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        session_status(self.level, self.history.len(), self.finish_requested)
    }

    pub fn is_complete(&self) -> bool {
        self.status() == SessionStatus::Complete
    }

    /// Sample the next comparison using the thread RNG.
    pub fn next_pair(&mut self) -> Result<&Pair, TasteError> {
        self.next_pair_with_rng(&mut rand::rng())
    }

    /// Sample the next comparison, replacing any unanswered one.
    pub fn next_pair_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Pair, TasteError> {
        if self.is_complete() {
            return Err(TasteError::SessionComplete);
        }
        let pair = sample_pair_with_rng(&self.active_styles, &self.catalog, rng)?;
        Ok(&*self.current_pair.insert(pair))
    }

    /// Record the user's pick for the current pair, stamped with the current time.
    pub fn apply_choice(&mut self, picked: Side) -> Result<ScoreDelta, TasteError> {
        self.apply_choice_at(picked, chrono::Utc::now().timestamp_millis())
    }

    /// Record the user's pick for the current pair with an explicit timestamp (ms).
    ///
    /// The winner's style gains the winner's quiz weight, the loser's style
    /// loses the loser's quiz weight. Consumes the current pair.
    pub fn apply_choice_at(&mut self, picked: Side, ts: i64) -> Result<ScoreDelta, TasteError> {
        if self.is_complete() {
            return Err(TasteError::SessionComplete);
        }
        let pair = self.current_pair.take().ok_or(TasteError::NoActivePair)?;

        let winner = pair.side(picked);
        let loser = pair.side(picked.other());

        *self.raw_scores.entry(winner.style.clone()).or_insert(0.0) += winner.image.quiz_weight;
        *self.raw_scores.entry(loser.style.clone()).or_insert(0.0) -= loser.image.quiz_weight;

        let delta = ScoreDelta {
            winner_style: winner.style.clone(),
            winner_weight: winner.image.quiz_weight,
            loser_style: loser.style.clone(),
            loser_weight: loser.image.quiz_weight,
        };

        self.history.push(PreferenceChoice {
            q: self.history.len(),
            left: ChoiceSide::from(&pair.left),
            right: ChoiceSide::from(&pair.right),
            picked,
            ts,
        });

        debug!(
            q = self.history.len() - 1,
            winner = %delta.winner_style,
            loser = %delta.loser_style,
            "choice applied"
        );

        if self.is_complete() {
            info!(answered = self.history.len(), "taste session complete");
        }

        Ok(delta)
    }

    /// End an `Advanced` session once the early-finish threshold is reached.
    pub fn finish_early(&mut self) -> Result<(), TasteError> {
        if self.status() != SessionStatus::EarlyFinishAvailable {
            return Err(TasteError::EarlyFinishUnavailable {
                level: self.level,
                answered: self.history.len(),
            });
        }
        self.finish_requested = true;
        self.current_pair = None;
        info!(answered = self.history.len(), "taste session finished early");
        Ok(())
    }

    /// The session's result. Computed once, after completion, then cached.
    pub fn result(&mut self) -> Result<&QuizResult, TasteError> {
        if !self.is_complete() {
            return Err(TasteError::SessionInProgress {
                answered: self.history.len(),
                target: self.level.config().target,
            });
        }
        let result = match self.result.take() {
            Some(result) => result,
            None => compute_result(&self.active_styles, &self.raw_scores, &self.history)?,
        };
        Ok(&*self.result.insert(result))
    }
}

fn check_pick_rule(level: Level, styles: &[String]) -> Result<(), TasteError> {
    let rule = level.config().pick_rule;
    if !rule.accepts(styles.len()) {
        return Err(TasteError::SelectionRule { level, rule, got: styles.len() });
    }
    Ok(())
}
