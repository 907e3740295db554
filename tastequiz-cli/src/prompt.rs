/// Terminal rendering of a comparison and parsing of the user's answer.
use tastequiz_core::{Candidate, Pair, Side};

/// What the user typed in response to a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Pick(Side),
    Finish,
    Quit,
}

fn describe(c: &Candidate) -> String {
    format!("{} [{}] (weight {:.2})", c.image.relative_path, c.style, c.image.quiz_weight)
}

/// Build the question shown for `pair`. `number` is 1-based.
pub fn render_pair(pair: &Pair, number: usize, target: usize, image_root: Option<&str>) -> String {
    let path = |c: &Candidate| match image_root {
        Some(root) => format!("{}/{}", root.trim_end_matches('/'), describe(c)),
        None => describe(c),
    };
    format!(
        "Question {number}/{target}\n\
         \x20 1) {}\n\
         \x20 2) {}\n",
        path(&pair.left),
        path(&pair.right),
    )
}

/// Parse one line of input. `None` for anything unrecognized.
///
/// Accepts 1/l/left, 2/r/right, f/finish, q/quit (any case).
pub fn parse_answer(input: &str) -> Option<Answer> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "l" | "left" => Some(Answer::Pick(Side::Left)),
        "2" | "r" | "right" => Some(Answer::Pick(Side::Right)),
        "f" | "finish" => Some(Answer::Finish),
        "q" | "quit" => Some(Answer::Quit),
        _ => None,
    }
}
