/// Quiz levels and session completion rules.
///
/// A level fixes how many comparisons a session asks for, how many styles the
/// user must preselect, and how strongly the finished session should later be
/// blended into a long-lived profile. The engine never interprets that last
/// number; it is carried through to the result export.
use std::fmt;
use std::str::FromStr;

/// The three fixed quiz levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    #[cfg_attr(feature = "serde", serde(rename = "l1"))]
    Quick,
    #[cfg_attr(feature = "serde", serde(rename = "l2"))]
    Planned,
    #[cfg_attr(feature = "serde", serde(rename = "l3"))]
    Advanced,
}

/// How many styles the user must pick before the comparison phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylePickRule {
    Exact(usize),
    AtLeast(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    pub label: &'static str,
    pub description: &'static str,
    /// Number of comparisons. For `Advanced` this is the hard cap.
    pub target: usize,
    pub pick_rule: StylePickRule,
    pub baseline_update_weight: f64,
    /// Answer count after which the user may end the session early.
    pub early_finish_at: Option<usize>,
}

/// Where a session stands after some number of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    /// The user may end the session now, or keep going up to the cap.
    EarlyFinishAvailable,
    Complete,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Quick, Level::Planned, Level::Advanced];

    pub fn config(self) -> LevelConfig {
        match self {
            Level::Quick => LevelConfig {
                label: "L1 · Quick",
                description: "7 questions. For spur-of-the-moment gallery tours. Saves to profile with lower weight.",
                target: 7,
                pick_rule: StylePickRule::Exact(2),
                baseline_update_weight: 0.25,
                early_finish_at: None,
            },
            Level::Planned => LevelConfig {
                label: "L2 · Planned",
                description: "20 questions. Ideal for planned museum trips. More interactive; average profile weight.",
                target: 20,
                pick_rule: StylePickRule::Exact(4),
                baseline_update_weight: 0.6,
                early_finish_at: None,
            },
            Level::Advanced => LevelConfig {
                label: "L3 · Advanced",
                description: "40–80 questions. Deep baseline calibration; heavy profile weight. Finish after 40 if desired.",
                target: 80,
                pick_rule: StylePickRule::AtLeast(1),
                baseline_update_weight: 1.0,
                early_finish_at: Some(40),
            },
        }
    }

    /// Short key used on the command line and in exports.
    pub fn key(self) -> &'static str {
        match self {
            Level::Quick => "l1",
            Level::Planned => "l2",
            Level::Advanced => "l3",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l1" | "quick" => Ok(Level::Quick),
            "l2" | "planned" => Ok(Level::Planned),
            "l3" | "advanced" => Ok(Level::Advanced),
            other => Err(format!("unknown level \"{other}\" (expected l1, l2 or l3)")),
        }
    }
}

impl StylePickRule {
    pub fn accepts(self, picked: usize) -> bool {
        match self {
            StylePickRule::Exact(n) => picked == n,
            StylePickRule::AtLeast(n) => picked >= n,
        }
    }
}

impl fmt::Display for StylePickRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StylePickRule::Exact(1) => write!(f, "exactly 1 style"),
            StylePickRule::Exact(n) => write!(f, "exactly {n} styles"),
            StylePickRule::AtLeast(1) => write!(f, "at least 1 style"),
            StylePickRule::AtLeast(n) => write!(f, "at least {n} styles"),
        }
    }
}

/// Completion rule for a session at `level` after `choice_count` answers.
///
/// Fixed-length levels complete at their target. `Advanced` completes at its
/// cap, or at the early-finish threshold once the caller has asked to finish.
pub fn session_status(level: Level, choice_count: usize, finish_requested: bool) -> SessionStatus {
    let config = level.config();

    if choice_count >= config.target {
        return SessionStatus::Complete;
    }

    match config.early_finish_at {
        Some(threshold) if choice_count >= threshold => {
            if finish_requested {
                SessionStatus::Complete
            } else {
                SessionStatus::EarlyFinishAvailable
            }
        }
        _ => SessionStatus::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_levels_complete_at_target() {
        assert_eq!(session_status(Level::Quick, 6, false), SessionStatus::InProgress);
        assert_eq!(session_status(Level::Quick, 7, false), SessionStatus::Complete);
        assert_eq!(session_status(Level::Planned, 19, false), SessionStatus::InProgress);
        assert_eq!(session_status(Level::Planned, 20, false), SessionStatus::Complete);
    }

    #[test]
    fn test_finish_request_ignored_on_fixed_levels() {
        assert_eq!(session_status(Level::Quick, 3, true), SessionStatus::InProgress);
    }

    #[test]
    fn test_advanced_early_finish_window() {
        assert_eq!(session_status(Level::Advanced, 39, false), SessionStatus::InProgress);
        assert_eq!(session_status(Level::Advanced, 39, true), SessionStatus::InProgress);
        assert_eq!(session_status(Level::Advanced, 40, false), SessionStatus::EarlyFinishAvailable);
        assert_eq!(session_status(Level::Advanced, 40, true), SessionStatus::Complete);
        assert_eq!(session_status(Level::Advanced, 79, false), SessionStatus::EarlyFinishAvailable);
        assert_eq!(session_status(Level::Advanced, 80, false), SessionStatus::Complete);
    }

    #[test]
    fn test_pick_rules() {
        assert!(StylePickRule::Exact(2).accepts(2));
        assert!(!StylePickRule::Exact(2).accepts(3));
        assert!(StylePickRule::AtLeast(1).accepts(5));
        assert!(!StylePickRule::AtLeast(1).accepts(0));
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("l2".parse::<Level>(), Ok(Level::Planned));
        assert_eq!(" Advanced ".parse::<Level>(), Ok(Level::Advanced));
        assert!("l4".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_table() {
        assert_eq!(Level::Quick.config().baseline_update_weight, 0.25);
        assert_eq!(Level::Planned.config().pick_rule, StylePickRule::Exact(4));
        assert_eq!(Level::Advanced.config().early_finish_at, Some(40));
    }
}
