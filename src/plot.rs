//! Scatter chart of problem size against solve time, written as SVG.
//!
//! Satisfiable problems are drawn as green circles and unsatisfiable ones as red triangles.
//! A dashed blue `2^n` curve marks the worst case of the exhaustive search.

use crate::report::{read_samples, Sample};
use log::{info, warn};
use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const TICKS: usize = 5;
const MARKER: f64 = 4.0;

/// Maps data coordinates onto the plotting area.
struct Frame {
    x_max: f64,
    y_max: f64,
}

impl Frame {
    fn new(samples: &[Sample]) -> Self {
        let max_n = samples.iter().map(|s| s.num_variables).max().unwrap_or(0);
        let max_time = samples.iter().map(|s| s.micros).max().unwrap_or(0) as f64;
        Self {
            x_max: max_n.max(1) as f64,
            y_max: max_time
                .max(worst_case(max_n).unwrap_or_else(|| 2f64.powi(f64::MAX_EXP - 1)))
                .max(1.0),
        }
    }

    fn x(&self, n: f64) -> f64 {
        MARGIN_LEFT + n / self.x_max * (WIDTH - MARGIN_LEFT - MARGIN_RIGHT)
    }

    fn y(&self, micros: f64) -> f64 {
        HEIGHT - MARGIN_BOTTOM - micros / self.y_max * (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM)
    }
}

/// `2^n`, or `None` once it no longer fits in an `f64`.
fn worst_case(n: usize) -> Option<f64> {
    i32::try_from(n)
        .ok()
        .map(|e| 2f64.powi(e))
        .filter(|v| v.is_finite())
}

pub fn render_svg<W: Write>(samples: &[Sample], mut out: W) -> io::Result<()> {
    let frame = Frame::new(samples);
    let max_n = samples.iter().map(|s| s.num_variables).max().unwrap_or(0);
    let (left, right) = (frame.x(0.0), frame.x(frame.x_max));
    let (bottom, top) = (frame.y(0.0), frame.y(frame.y_max));

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
        w = WIDTH,
        h = HEIGHT
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        out,
        r#"<text x="{}" y="25" text-anchor="middle" font-size="16">SAT Solver Performance: Number of Variables vs Execution Time</text>"#,
        WIDTH / 2.0
    )?;

    // axes
    writeln!(
        out,
        r#"<path d="M{:.1},{:.1} L{:.1},{:.1} L{:.1},{:.1}" fill="none" stroke="black"/>"#,
        left, top, left, bottom, right, bottom
    )?;
    for i in 0..=TICKS {
        let n = frame.x_max / TICKS as f64 * i as f64;
        let t = frame.y_max / TICKS as f64 * i as f64;
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{:.0}</text>"#,
            frame.x(n),
            bottom + 18.0,
            n
        )?;
        writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{:.0}</text>"#,
            left - 6.0,
            frame.y(t) + 4.0,
            t
        )?;
    }
    writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">Number of Variables</text>"#,
        (left + right) / 2.0,
        HEIGHT - 15.0
    )?;
    writeln!(
        out,
        r#"<text x="20" y="{y:.1}" text-anchor="middle" transform="rotate(-90 20 {y:.1})">Execution Time (microseconds)</text>"#,
        y = (top + bottom) / 2.0
    )?;

    // 2^n reference
    if max_n >= 1 {
        let points: Vec<String> = (1..=max_n)
            .map_while(|n| worst_case(n).map(|t| (n, t)))
            .map(|(n, t)| format!("{:.1},{:.1}", frame.x(n as f64), frame.y(t)))
            .collect();
        writeln!(
            out,
            r#"<polyline class="worst-case" points="{}" fill="none" stroke="blue" stroke-dasharray="6,4"/>"#,
            points.join(" ")
        )?;
    }

    for s in samples {
        let (cx, cy) = (frame.x(s.num_variables as f64), frame.y(s.micros as f64));
        if s.satisfiable {
            writeln!(
                out,
                r#"<circle class="sat" cx="{:.1}" cy="{:.1}" r="{}" fill="green"/>"#,
                cx, cy, MARKER
            )?;
        } else {
            writeln!(
                out,
                r#"<path class="unsat" d="M{:.1},{:.1} L{:.1},{:.1} L{:.1},{:.1} Z" fill="red"/>"#,
                cx,
                cy - MARKER,
                cx - MARKER,
                cy + MARKER,
                cx + MARKER,
                cy + MARKER
            )?;
        }
    }

    // legend, upper left
    let (lx, ly) = (left + 15.0, top + 15.0);
    writeln!(
        out,
        r#"<circle cx="{:.1}" cy="{:.1}" r="{}" fill="green"/><text x="{:.1}" y="{:.1}">Satisfiable</text>"#,
        lx,
        ly,
        MARKER,
        lx + 12.0,
        ly + 4.0
    )?;
    writeln!(
        out,
        r#"<path d="M{:.1},{:.1} L{:.1},{:.1} L{:.1},{:.1} Z" fill="red"/><text x="{:.1}" y="{:.1}">Unsatisfiable</text>"#,
        lx,
        ly + 20.0 - MARKER,
        lx - MARKER,
        ly + 20.0 + MARKER,
        lx + MARKER,
        ly + 20.0 + MARKER,
        lx + 12.0,
        ly + 24.0
    )?;
    writeln!(
        out,
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="blue" stroke-dasharray="6,4"/><text x="{:.1}" y="{:.1}">2^n Worst-case</text>"#,
        lx - 6.0,
        ly + 40.0,
        lx + 6.0,
        ly + 40.0,
        lx + 12.0,
        ly + 44.0
    )?;

    writeln!(out, "</svg>")?;
    out.flush()
}

/// Re-reads the results log at `log` and charts it to `svg`. Returns false without writing
/// anything if the log holds no results.
pub fn plot_file(log: &Path, svg: &Path) -> io::Result<bool> {
    let samples = read_samples(File::open(log)?)?;
    if samples.is_empty() {
        warn!("no data found in {}", log.display());
        return Ok(false);
    }
    render_svg(&samples, BufWriter::new(File::create(svg)?))?;
    info!("wrote {} samples to {}", samples.len(), svg.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use test_env_log::test;

    fn samples() -> Vec<Sample> {
        vec![
            Sample {
                num_variables: 3,
                micros: 2,
                satisfiable: true,
            },
            Sample {
                num_variables: 5,
                micros: 40,
                satisfiable: false,
            },
            Sample {
                num_variables: 4,
                micros: 9,
                satisfiable: true,
            },
        ]
    }

    fn render(samples: &[Sample]) -> String {
        let mut out = vec![];
        render_svg(samples, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn one_marker_per_sample() {
        let svg = render(&samples());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches(r#"class="sat""#).count(), 2);
        assert_eq!(svg.matches(r#"class="unsat""#).count(), 1);
        assert_eq!(svg.matches(r#"class="worst-case""#).count(), 1);
        assert!(svg.contains("2^n Worst-case"));
    }

    #[test]
    fn curve_has_a_point_per_variable_count() {
        let svg = render(&samples());
        let line = svg
            .lines()
            .find(|l| l.contains(r#"class="worst-case""#))
            .unwrap();
        let points = line.split("points=\"").nth(1).unwrap().split('"').next().unwrap();
        assert_eq!(points.split(' ').count(), 5);
    }

    #[test]
    fn frame_covers_curve_and_samples() {
        let frame = Frame::new(&samples());
        assert_eq!(frame.x_max, 5.0);
        assert_eq!(frame.y_max, 40.0);
        assert_eq!(frame.y(0.0), HEIGHT - MARGIN_BOTTOM);
        assert_eq!(frame.y(frame.y_max), MARGIN_TOP);
    }

    #[test]
    fn huge_variable_counts_stay_finite() {
        let samples = vec![
            Sample {
                num_variables: 1100,
                micros: 7,
                satisfiable: true,
            },
            Sample {
                num_variables: 2,
                micros: 3,
                satisfiable: false,
            },
        ];
        let frame = Frame::new(&samples);
        assert!(frame.y_max.is_finite());
        assert!(frame.y(7.0).is_finite());

        let svg = render(&samples);
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
        let line = svg
            .lines()
            .find(|l| l.contains(r#"class="worst-case""#))
            .unwrap();
        let points = line.split("points=\"").nth(1).unwrap().split('"').next().unwrap();
        // 2^1024 overflows
        assert_eq!(points.split(' ').count(), 1023);
    }

    #[test]
    fn plot_from_log_file() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("results.txt");
        let svg = dir.path().join("chart.svg");
        fs::write(
            &log,
            "Program: dumbsat\nInput File: stdin\n\n\
             1: 3 variables - Satisfiable: True, Time: 2 microseconds\n\
             Assignment: {1: 1, 2: 1, 3: 1}\n",
        )
        .unwrap();

        assert!(plot_file(&log, &svg).unwrap());
        let contents = fs::read_to_string(&svg).unwrap();
        assert_eq!(contents.matches(r#"class="sat""#).count(), 1);
    }

    #[test]
    fn empty_log_writes_nothing() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("results.txt");
        let svg = dir.path().join("chart.svg");
        fs::write(&log, "Program: dumbsat\nInput File: stdin\n\n").unwrap();

        assert!(!plot_file(&log, &svg).unwrap());
        assert!(!svg.exists());
    }
}
