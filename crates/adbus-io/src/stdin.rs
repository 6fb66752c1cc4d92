//! Five-line standard-input protocol.
//!
//! Mirrors the original tool's `parse::input`: age-group filter, budget, and
//! three file paths, each read as a single line in order. Lines 3–5 are
//! trimmed of trailing whitespace only, matching the reference's
//! `while (isspace(back())) pop_back()` convention — leading whitespace in a
//! path is preserved.

use std::io::BufRead;

use adbus_core::{AdbusError, AdbusResult};

/// The five-line request read from standard input.
#[derive(Debug, Clone, PartialEq)]
pub struct StdinRequest {
    pub target_ages: String,
    pub budget: f64,
    pub regions_path: String,
    pub routes_path: String,
    pub activity_csv_path: String,
}

/// Read and validate the fixed five-line protocol from `reader`.
pub fn read_stdin_request(mut reader: impl BufRead) -> AdbusResult<StdinRequest> {
    let age_line = read_raw_line(&mut reader)?;
    let target_ages = parse_target_ages(&age_line)?;

    let budget_line = read_raw_line(&mut reader)?;
    let budget: f64 = budget_line.trim().parse().map_err(|_| {
        AdbusError::structural("stdin", format!("budget {budget_line:?} is not a number"))
    })?;
    if !(budget.is_finite() && budget > 0.0) {
        return Err(AdbusError::numeric_boundary(
            "stdin",
            "budget must be a positive finite number",
        ));
    }

    let regions_path = read_raw_line(&mut reader)?.trim_end().to_string();
    let routes_path = read_raw_line(&mut reader)?.trim_end().to_string();
    let activity_csv_path = read_raw_line(&mut reader)?.trim_end().to_string();

    Ok(StdinRequest {
        target_ages,
        budget,
        regions_path,
        routes_path,
        activity_csv_path,
    })
}

/// Parse a comma-separated list of single-character age-group tokens.
pub fn parse_target_ages(line: &str) -> AdbusResult<String> {
    let mut ages = String::new();
    for raw in line.split(',') {
        let token = raw.trim();
        if token.chars().count() != 1 {
            return Err(AdbusError::structural(
                "stdin",
                format!("age group token {token:?} is not a single character"),
            ));
        }
        ages.push(token.chars().next().unwrap());
    }
    Ok(ages)
}

fn read_raw_line(reader: &mut impl BufRead) -> AdbusResult<String> {
    let mut buf = String::new();
    let n = reader.read_line(&mut buf)?;
    if n == 0 {
        return Err(AdbusError::structural("stdin", "unexpected end of input"));
    }
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}
