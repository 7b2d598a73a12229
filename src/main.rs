use clap::{App, Arg};
use dumbsat::formula::csv::{parse, ParseError};
use dumbsat::formula::Formula;
use dumbsat::report::{write_header, write_result};
use dumbsat::*;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

const DEFAULT_PLOT: &str = "sat_solver_performance.svg";

#[derive(Error, Debug)]
enum CliError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Invalid(#[from] InvalidProblem),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

fn main() {
    env_logger::init();

    let matches = App::new("dumbsat")
        .about("Decides CNF problems by exhaustive search and charts how long each took")
        .arg(Arg::with_name("INPUT").help("input file (CNF problems as CSV)").index(1))
        .arg(Arg::with_name("OUTPUT").help("results file, stdout if omitted").index(2))
        .arg(
            Arg::with_name("plot")
                .long("plot")
                .value_name("SVG")
                .takes_value(true)
                .help("where to draw the chart when OUTPUT is given"),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("reject problems whose clauses disagree with their header"),
        )
        .get_matches();

    let program = std::env::args().next().unwrap_or_else(|| "dumbsat".to_string());
    let input = matches.value_of("INPUT").map(Path::new);
    let output = matches.value_of("OUTPUT").map(Path::new);
    let plot = Path::new(matches.value_of("plot").unwrap_or(DEFAULT_PLOT));

    if let Err(e) = run(&program, input, output, plot, matches.is_present("strict")) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(
    program: &str,
    input: Option<&Path>,
    output: Option<&Path>,
    plot: &Path,
    strict: bool,
) -> Result<(), CliError> {
    let problems = match input {
        Some(path) => parse_from_file(path)?,
        None => parse(io::stdin())?,
    };
    info!("read {} problems", problems.len());

    check_problems(&problems, strict)?;

    match output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            solve_all(&mut out, program, input, &problems)?;
            out.flush()?;
            drop(out);
            dumbsat::plot::plot_file(path, plot)?;
        }
        None => {
            let stdout = io::stdout();
            solve_all(&mut stdout.lock(), program, input, &problems)?;
        }
    }
    Ok(())
}

fn solve_all<W: Write>(
    out: &mut W,
    program: &str,
    input: Option<&Path>,
    problems: &[Formula],
) -> io::Result<()> {
    write_header(out, program, input)?;
    for (i, f) in problems.iter().enumerate() {
        let result = solve(f);
        info!(
            "problem {}: {} variables, {} clauses, {} in {}us",
            i + 1,
            f.num_variables(),
            f.num_clauses(),
            if result.satisfiable { "sat" } else { "unsat" },
            result.elapsed_micros()
        );
        write_result(out, i + 1, f.num_variables(), &result)?;
    }
    Ok(())
}

fn parse_from_file(path: &Path) -> Result<Vec<Formula>, ParseError> {
    let file = File::open(path)?;
    parse(file)
}
