//! Plain-text results log, and a reader that pulls the timing samples back out of it.
//!
//! Each problem produces a line of the form
//!
//! ```text
//! 3: 12 variables - Satisfiable: True, Time: 418 microseconds
//! ```
//!
//! followed by either the satisfying assignment or a note that none was found. [`read_samples`]
//! depends on this layout, so keep the two in step.

use crate::SearchResult;
use log::warn;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

/// One solved problem as recovered from a results log.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Sample {
    pub num_variables: usize,
    pub micros: u128,
    pub satisfiable: bool,
}

pub fn write_header<W: Write>(out: &mut W, program: &str, input: Option<&Path>) -> io::Result<()> {
    writeln!(out, "Program: {}", program)?;
    match input {
        Some(path) => writeln!(out, "Input File: {}", path.display())?,
        None => writeln!(out, "Input File: stdin")?,
    }
    writeln!(out)
}

pub fn write_result<W: Write>(
    out: &mut W,
    index: usize,
    num_variables: usize,
    result: &SearchResult,
) -> io::Result<()> {
    writeln!(
        out,
        "{}: {} variables - Satisfiable: {}, Time: {} microseconds",
        index,
        num_variables,
        if result.satisfiable { "True" } else { "False" },
        result.elapsed_micros()
    )?;
    if result.satisfiable {
        writeln!(out, "Assignment: {}", result.assignment)
    } else {
        writeln!(out, "No satisfying assignment found.")
    }
}

/// Collects a [`Sample`] from every result line. Other lines are ignored; result lines that
/// do not parse are logged and skipped.
pub fn read_samples<R: Read>(reader: R) -> io::Result<Vec<Sample>> {
    let mut samples = vec![];
    for line in BufReader::new(reader).lines() {
        let line = line?;
        if !line.contains(": ") || !line.contains("variables") {
            continue;
        }
        match parse_result_line(&line) {
            Some(sample) => samples.push(sample),
            None => warn!("skipping malformed result line: {}", line),
        }
    }
    Ok(samples)
}

fn parse_result_line(line: &str) -> Option<Sample> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let num_variables = parts.get(1)?.parse().ok()?;
    let micros = parts.get(parts.len().checked_sub(2)?)?.parse().ok()?;
    Some(Sample {
        num_variables,
        micros,
        satisfiable: line.contains("True"),
    })
}
