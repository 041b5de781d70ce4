//! Interactive prompts on stdin

use std::io::{self, BufRead, Write};

use crate::error::{NetsnapError, NetsnapResult};

/// Print `prompt` and read one line without its line ending
///
/// Returns `None` when stdin is closed.
pub fn prompt_line(prompt: &str) -> NetsnapResult<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush().map_err(|e| NetsnapError::Io(e.to_string()))?;

    read_line(&mut io::stdin().lock())
}

/// Prompt for a 1-based backup number
pub fn prompt_index(prompt: &str) -> NetsnapResult<Option<usize>> {
    match prompt_line(prompt)? {
        Some(input) => parse_index(&input).map(Some),
        None => Ok(None),
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> NetsnapResult<Option<String>> {
    let mut input = String::new();
    let read = reader
        .read_line(&mut input)
        .map_err(|e| NetsnapError::Io(e.to_string()))?;
    if read == 0 {
        return Ok(None);
    }

    let line = input.strip_suffix('\n').unwrap_or(&input);
    let line = line.strip_suffix('\r').unwrap_or(line);
    Ok(Some(line.to_string()))
}

fn parse_index(input: &str) -> NetsnapResult<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| NetsnapError::Validation(format!("Invalid selection: {:?}", input.trim())))
}
