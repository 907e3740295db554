/// Output formatting: terminal table, JSON, and the result export document.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tastequiz_core::constants::RESULT_VERSION;
use tastequiz_core::{Level, PreferenceChoice, QuizResult, StyleScore, TasteSession};

/// Everything a finished session hands to storage or to the taste service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultExport {
    pub version: String,
    pub level: Level,
    pub baseline_update_weight: f64,
    pub questions_answered: usize,
    pub questions_target: usize,
    pub moods: Vec<String>,
    pub colors: Vec<String>,
    #[serde(rename = "pickedStyles")]
    pub picked_styles: Vec<String>,
    pub styles: Vec<StyleScore>,
    pub choices: Vec<PreferenceChoice>,
}

impl ResultExport {
    pub fn new(session: &TasteSession, result: &QuizResult, moods: &[String], colors: &[String]) -> Self {
        let config = session.level().config();
        ResultExport {
            version: RESULT_VERSION.to_string(),
            level: session.level(),
            baseline_update_weight: config.baseline_update_weight,
            questions_answered: session.choice_count(),
            questions_target: config.target,
            moods: moods.to_vec(),
            colors: colors.to_vec(),
            picked_styles: session.active_styles().to_vec(),
            styles: result.styles.clone(),
            choices: session.history().to_vec(),
        }
    }
}

/// Default export file name for a session finished now at `level`.
pub fn default_export_path(dir: &Path, level: Level) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("tastequiz_{}_{stamp}.json", level.key()))
}

pub fn write_export(path: &Path, export: &ResultExport) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {e}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(export)
        .map_err(|e| format!("Failed to serialize result: {e}"))?;
    std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

pub fn read_export(path: &Path) -> Result<ResultExport, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse result {}: {e}", path.display()))
}

/// Render the result as a terminal table.
pub fn format_table(export: &ResultExport) -> String {
    let name_width = export
        .styles
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(5)
        .max(5); // at least "Style"

    let mut out = String::new();
    out.push_str(&format!(" # | {:<name_width$} |  Share |    Raw | Compared\n", "Style"));
    out.push_str(&format!("---|-{}-|--------|--------|---------\n", "-".repeat(name_width)));

    for (i, s) in export.styles.iter().enumerate() {
        out.push_str(&format!(
            "{:>2} | {:<name_width$} | {:>5.1}% | {:>+6.2} | {:>8}\n",
            i + 1,
            s.name,
            s.score * 100.0,
            s.raw,
            s.rated,
        ));
    }

    out.push_str(&format!(
        "\n{} of {} questions answered at {} (profile weight {})\n",
        export.questions_answered,
        export.questions_target,
        export.level.config().label,
        export.baseline_update_weight,
    ));

    if let Some(top) = export.styles.first() {
        out.push_str(&format!("\nWhy {} came out on top:\n", top.name));
        for e in &top.pos {
            out.push_str(&format!("  {:+.2}  {}\n", e.delta, e.relative_path));
        }
        for e in &top.neg {
            out.push_str(&format!("  {:+.2}  {}\n", e.delta, e.relative_path));
        }
    }

    if !export.moods.is_empty() || !export.colors.is_empty() {
        out.push_str(&format!(
            "\nMoods: {} | Colors: {}\n",
            join_or_dash(&export.moods),
            join_or_dash(&export.colors),
        ));
    }

    out
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

pub fn print_table(export: &ResultExport) {
    print!("{}", format_table(export));
}

pub fn print_json(export: &ResultExport) {
    match serde_json::to_string_pretty(export) {
        Ok(json) => println!("{json}"),
        Err(e) => crate::bail(format!("Failed to serialize result: {e}")),
    }
}

/// Describe the three quiz levels.
pub fn print_levels() {
    for level in Level::ALL {
        let c = level.config();
        let questions = match c.early_finish_at {
            Some(early) => format!("{early}–{}", c.target),
            None => c.target.to_string(),
        };
        println!("{} ({})", c.label, level.key());
        println!("  {}", c.description);
        println!(
            "  Questions: {questions} | Styles: {} | Profile weight: {}\n",
            c.pick_rule, c.baseline_update_weight,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tastequiz_core::{Manifest, QuizImage, Side, StyleBlock, StyleCatalog};

    fn finished_session() -> TasteSession {
        let image = |p: &str, w: f64| QuizImage {
            relative_path: p.to_string(),
            embedding_index: 1,
            rep_score: 0.0,
            disc_score: 0.0,
            quiz_weight: w,
        };
        let manifest = Manifest {
            styles: vec![
                StyleBlock { name: "Impressionism".into(), images: vec![image("imp/a.jpg", 1.0)] },
                StyleBlock { name: "Cubism".into(), images: vec![image("cub/a.jpg", 0.5)] },
            ],
        };
        let catalog = StyleCatalog::from_manifest(&manifest).unwrap();
        let picked = vec!["Impressionism".to_string(), "Cubism".to_string()];
        let mut session = TasteSession::new(catalog, Level::Quick, Some(picked.as_slice())).unwrap();
        while !session.is_complete() {
            let pair = session.next_pair().unwrap();
            let side = if pair.left.style == "Impressionism" { Side::Left } else { Side::Right };
            session.apply_choice_at(side, 1_700_000_000_000).unwrap();
        }
        session
    }

    fn export() -> ResultExport {
        let mut session = finished_session();
        let result = session.result().unwrap().clone();
        ResultExport::new(&session, &result, &["Calm".to_string()], &[])
    }

    #[test]
    fn test_export_fields() {
        let e = export();
        assert_eq!(e.version, "user-test-prototype-v2");
        assert_eq!(e.level, Level::Quick);
        assert_eq!(e.baseline_update_weight, 0.25);
        assert_eq!(e.questions_answered, 7);
        assert_eq!(e.questions_target, 7);
        assert_eq!(e.choices.len(), 7);
        assert_eq!(e.styles[0].name, "Impressionism");
    }

    #[test]
    fn test_export_json_shape() {
        let value = serde_json::to_value(export()).unwrap();
        assert_eq!(value["level"], "l1");
        assert_eq!(value["pickedStyles"][0], "Impressionism");
        assert_eq!(value["styles"][0]["pos"][0]["rel"], "imp/a.jpg");
        assert!(value["choices"][0]["left"]["relativePath"].is_string());
        assert!(value["choices"][0]["picked"] == "left" || value["choices"][0]["picked"] == "right");
        assert_eq!(value["choices"][6]["q"], 6);
    }

    #[test]
    fn test_export_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("tastequiz-test-{}", std::process::id()));
        let path = default_export_path(&dir, Level::Quick);
        let e = export();
        write_export(&path, &e).unwrap();

        let read = read_export(&path).unwrap();
        assert_eq!(read.level, e.level);
        assert_eq!(read.picked_styles, e.picked_styles);
        assert_eq!(read.choices.len(), e.choices.len());
        assert_eq!(read.styles[0].name, e.styles[0].name);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_table_lists_styles_and_evidence() {
        let table = format_table(&export());
        assert!(table.contains("Impressionism"));
        assert!(table.contains("Cubism"));
        assert!(table.contains("7 of 7 questions answered at L1 · Quick"));
        assert!(table.contains("Why Impressionism came out on top:"));
        assert!(table.contains("+1.00  imp/a.jpg"));
        assert!(table.contains("Moods: Calm | Colors: -"));
    }
}
