use std::io::{self, BufRead, Write};

pub const CONFIRM_PROMPT: &str = "Execute on host? (y/N): ";

/// Source of the human yes/no decision before a command runs
pub trait Confirmer: Send + Sync {
    /// Ask whether `command` may run. Blocks until an answer arrives, so the
    /// gate calls it from a blocking thread.
    fn confirm(&self, command: &str) -> io::Result<bool>;
}

/// Only `y` and `yes` (any case, surrounding whitespace ignored) confirm
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Write the prompt and read one answer line
///
/// End of input counts as a refusal.
pub fn read_confirmation<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<bool> {
    writer.write_all(CONFIRM_PROMPT.as_bytes())?;
    writer.flush()?;

    let mut answer = String::new();
    let read = reader.read_line(&mut answer)?;
    if read == 0 {
        return Ok(false);
    }

    Ok(is_affirmative(&answer))
}

/// Interactive confirmation on the controlling terminal
#[derive(Debug, Default)]
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&self, _command: &str) -> io::Result<bool> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        read_confirmation(&mut stdin.lock(), &mut stdout.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("  YES \n"));
        assert!(is_affirmative("Y\n"));

        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yeah"));
        assert!(!is_affirmative("y es"));
    }

    #[test]
    fn test_read_confirmation_yes() {
        let mut input = Cursor::new("y\n");
        let mut output = Vec::new();

        assert!(read_confirmation(&mut input, &mut output).unwrap());
        assert_eq!(String::from_utf8(output).unwrap(), CONFIRM_PROMPT);
    }

    #[test]
    fn test_read_confirmation_default_is_no() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        assert!(!read_confirmation(&mut input, &mut output).unwrap());
    }

    #[test]
    fn test_read_confirmation_eof_is_no() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(!read_confirmation(&mut input, &mut output).unwrap());
    }

    #[test]
    fn test_read_confirmation_reads_one_line() {
        let mut input = Cursor::new("nope\ny\n");
        let mut output = Vec::new();
        assert!(!read_confirmation(&mut input, &mut output).unwrap());
    }
}
