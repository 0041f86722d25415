//! Typed confirmation for destructive operations

use std::io::{BufRead, Write};

use crate::errors::ConsoleError;

/// Phrase that must be typed before a delete is carried out
pub const PERMANENT_DELETE: &str = "permanently delete";

/// Check a typed confirmation against the expected phrase, exactly
pub fn require_phrase(typed: &str, phrase: &str) -> Result<(), ConsoleError> {
    if typed.trim_end_matches(['\r', '\n']) == phrase {
        Ok(())
    } else {
        Err(ConsoleError::ValidationError(format!(
            "Type \"{}\" to confirm",
            phrase
        )))
    }
}

/// Prompt for the confirmation phrase on a terminal
pub fn prompt_phrase<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    action: &str,
    phrase: &str,
) -> Result<(), ConsoleError> {
    write!(output, "{}. Type \"{}\" to continue: ", action, phrase)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    require_phrase(&line, phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_phrase_only() {
        assert!(require_phrase("permanently delete", PERMANENT_DELETE).is_ok());
        assert!(require_phrase("permanently delete\n", PERMANENT_DELETE).is_ok());
        assert!(require_phrase("Permanently delete", PERMANENT_DELETE).is_err());
        assert!(require_phrase(" permanently delete", PERMANENT_DELETE).is_err());
        assert!(require_phrase("", PERMANENT_DELETE).is_err());
    }

    #[test]
    fn test_prompt_reads_one_line() {
        let mut input = "permanently delete\nextra\n".as_bytes();
        let mut output = Vec::new();
        prompt_phrase(&mut input, &mut output, "Delete project site", PERMANENT_DELETE).unwrap();
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with("Delete project site."));
    }
}
