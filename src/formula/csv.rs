//! Reader for CNF problem sets laid out as comma-separated rows.
//!
//! Each problem starts with a `p,cnf,<variables>,<clauses>` row and is followed by one row
//! per clause, each literal in its own cell and terminated by `0`. Rows whose first cell is
//! `c` are comments. Several problems may follow each other in one input.

use crate::formula::{Clause, Formula, Literal};
use log::{debug, warn};
use std::io::{self, BufRead, BufReader, Read};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: malformed problem header")]
    MalformedHeader { line: usize },
    #[error("line {line}: invalid literal {value:?}")]
    InvalidLiteral { line: usize, value: String },
    #[error("line {line}: clause before any problem header")]
    MissingHeader { line: usize },
}

const BYTE_ORDER_MARK: char = '\u{feff}';

struct Header {
    num_variables: usize,
    num_clauses: usize,
}

pub fn parse<R: Read>(reader: R) -> Result<Vec<Formula>, ParseError> {
    let reader = BufReader::new(reader);

    let mut problems = vec![];
    let mut header: Option<Header> = None;
    let mut clauses = vec![];

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let cells = split_cells(&line);

        match cells.first().copied() {
            None => continue,
            Some("c") => continue,
            Some("p") => {
                let next = parse_header(&cells, line_no)?;
                if let Some(h) = header.replace(next) {
                    finish_problem(&mut problems, h, &mut clauses);
                }
            }
            Some(_) => {
                if header.is_none() {
                    return Err(ParseError::MissingHeader { line: line_no });
                }
                let mut clause = vec![];
                for cell in &cells {
                    if let Some(l) = parse_literal(cell, line_no)? {
                        clause.push(l);
                    }
                }
                if !clause.is_empty() {
                    clauses.push(Clause::new(clause));
                }
            }
        }
    }

    if let Some(h) = header {
        finish_problem(&mut problems, h, &mut clauses);
    }

    debug!("parsed {} problems", problems.len());
    Ok(problems)
}

/// Splits a row into its non-empty cells. A cell holding several whitespace-separated
/// tokens contributes each of them.
fn split_cells(line: &str) -> Vec<&str> {
    let line = line.trim_start_matches(BYTE_ORDER_MARK);
    line.split(',')
        .flat_map(|cell| cell.split_whitespace())
        .collect()
}

fn parse_header(cells: &[&str], line: usize) -> Result<Header, ParseError> {
    if cells.get(1) != Some(&"cnf") {
        return Err(ParseError::MalformedHeader { line });
    }
    let count = |i: usize| {
        cells
            .get(i)
            .and_then(|c| c.parse::<usize>().ok())
            .ok_or(ParseError::MalformedHeader { line })
    };
    Ok(Header {
        num_variables: count(2)?,
        num_clauses: count(3)?,
    })
}

// A header without clauses yields no problem at all.
fn finish_problem(problems: &mut Vec<Formula>, header: Header, clauses: &mut Vec<Clause>) {
    if clauses.is_empty() {
        return;
    }
    if clauses.len() != header.num_clauses {
        warn!(
            "problem {} declares {} clauses but has {}",
            problems.len() + 1,
            header.num_clauses,
            clauses.len()
        );
    }
    let clauses = std::mem::take(clauses);
    problems.push(Formula::with_header(header.num_variables, header.num_clauses, clauses));
}

fn parse_literal(s: &str, line: usize) -> Result<Option<Literal>, ParseError> {
    let l = s.parse::<i64>().map_err(|_| ParseError::InvalidLiteral {
        line,
        value: s.to_string(),
    })?;
    Ok(Literal::from_dimacs(l))
}
