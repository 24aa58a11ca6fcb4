use crate::utils::error::{FinderError, Result};
use crate::utils::validation::{validate_target_score, ScoreBounds};
use std::io::{BufRead, Write};

pub const SCORE_PROMPT: &str = "what is your sat score?: ";

/// Asks for a score until a valid one is entered. Invalid input is reported
/// on `output` and asked again; end of input is an `InvalidTarget` error.
pub fn prompt_for_score<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    bounds: ScoreBounds,
) -> Result<i64> {
    let mut line = String::new();
    loop {
        write!(output, "{}", SCORE_PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(FinderError::InvalidTarget {
                input: String::new(),
                reason: "no score entered".to_string(),
            });
        }

        match validate_target_score(&line, bounds) {
            Ok(score) => return Ok(score),
            Err(e) => {
                tracing::debug!("Rejected score input: {}", e);
                writeln!(output, "{}", e.user_friendly_message())?;
            }
        }
    }
}
