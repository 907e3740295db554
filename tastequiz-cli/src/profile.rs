/// Mood and colour preferences captured before the quiz.
///
/// These are recorded and exported with the result. The scoring engine never
/// sees them.

pub const MOODS: [&str; 8] = [
    "Calm",
    "Curious",
    "Reflective",
    "Energized",
    "Joyful",
    "Melancholic",
    "Focused",
    "Dreamy",
];

/// Colour names with their display hex codes.
pub const COLORS: [(&str, &str); 10] = [
    ("Red", "#D7263D"),
    ("Orange", "#F46036"),
    ("Yellow", "#F9C80E"),
    ("Lime", "#A3D900"),
    ("Green", "#2E8B57"),
    ("Teal", "#1AA6B7"),
    ("Cyan", "#2EC4B6"),
    ("Blue", "#3A86FF"),
    ("Violet", "#8338EC"),
    ("Magenta", "#FF006E"),
];

/// At least one mood and one colour, at most this many of each.
pub const MIN_PICKS: usize = 1;
pub const MAX_PICKS: usize = 3;

pub fn color_names() -> Vec<&'static str> {
    COLORS.iter().map(|(name, _)| *name).collect()
}

/// Match `requested` against `allowed` case-insensitively, dropping duplicates.
///
/// Errors on an unknown value, or when the distinct picks fall outside
/// `MIN_PICKS..=MAX_PICKS`.
pub fn pick_from(requested: &[String], allowed: &[&str], what: &str) -> Result<Vec<String>, String> {
    let mut picked: Vec<String> = Vec::new();
    for r in requested {
        let canonical = allowed
            .iter()
            .find(|a| a.eq_ignore_ascii_case(r.trim()))
            .ok_or_else(|| format!("Unknown {what} \"{}\". Choose from: {}", r.trim(), allowed.join(", ")))?;
        if !picked.iter().any(|p| p == canonical) {
            picked.push(canonical.to_string());
        }
    }
    if picked.len() < MIN_PICKS {
        return Err(format!(
            "Pick at least {MIN_PICKS} {what} with --{what}. Choose from: {}",
            allowed.join(", ")
        ));
    }
    if picked.len() > MAX_PICKS {
        return Err(format!("Pick at most {MAX_PICKS} {what}s, got {}", picked.len()));
    }
    Ok(picked)
}
