/// Interactive quiz loop.
///
/// Reads one answer per line from `input` and writes questions and feedback
/// to `out`. The binary wires these to stdin and stderr so stdout only ever
/// carries the final result.
use std::io::{BufRead, Write};

use tastequiz_core::{SessionStatus, TasteSession};

use crate::prompt::{self, Answer};

/// How an interactive run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOutcome {
    /// The session is complete and has a result.
    Completed,
    /// The user quit or input closed first. Nothing should be saved.
    Abandoned,
}

/// Ask questions until `session` completes, the user quits, or input ends.
pub fn play<R: BufRead, W: Write>(
    session: &mut TasteSession,
    input: R,
    out: &mut W,
    image_root: Option<&str>,
) -> Result<QuizOutcome, String> {
    let target = session.level().config().target;
    let mut lines = input.lines();

    while !session.is_complete() {
        let number = session.choice_count() + 1;
        let pair = session.next_pair().map_err(|e| e.to_string())?.clone();

        write!(out, "{}", prompt::render_pair(&pair, number, target, image_root)).map_err(io_err)?;
        if session.status() == SessionStatus::EarlyFinishAvailable {
            writeln!(out, "  f) finish now").map_err(io_err)?;
        }

        loop {
            write!(out, "> ").map_err(io_err)?;
            out.flush().map_err(io_err)?;

            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Err(format!("Failed to read input: {e}")),
                None => {
                    writeln!(out, "\nInput closed after {} answers; quiz abandoned.", session.choice_count())
                        .map_err(io_err)?;
                    return Ok(QuizOutcome::Abandoned);
                }
            };

            match prompt::parse_answer(&line) {
                Some(Answer::Pick(side)) => {
                    let delta = session.apply_choice(side).map_err(|e| e.to_string())?;
                    writeln!(out, "  {delta}\n").map_err(io_err)?;
                    break;
                }
                Some(Answer::Finish) => match session.finish_early() {
                    Ok(()) => break,
                    Err(e) => writeln!(out, "  Can't finish yet: {e}").map_err(io_err)?,
                },
                Some(Answer::Quit) => {
                    writeln!(out, "Quiz abandoned after {} answers.", session.choice_count()).map_err(io_err)?;
                    return Ok(QuizOutcome::Abandoned);
                }
                None => writeln!(out, "  Type 1 or 2 (l/r), f to finish early, q to quit.").map_err(io_err)?,
            }
        }
    }

    Ok(QuizOutcome::Completed)
}

fn io_err(e: std::io::Error) -> String {
    format!("Failed to write prompt: {e}")
}
