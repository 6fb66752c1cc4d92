//! Routes-file parser.
//!
//! Grounded in the original tool's `parse::route`/`parse::allRoutes`. Each
//! `type Feature` line carries a `RouteID`, a `Cost`, three per-timeslot bus
//! caps, and a `coordinates` run.
//!
//! The on-disk geometry is a GeoJSON `MultiLineString`, but the bracket
//! structure that separates its line-strings is lost once punctuation is
//! stripped to whitespace by the tokenizer — there is no character left in
//! the token stream that distinguishes "end of one line-string" from "a gap
//! between ordinary coordinate pairs". This parser follows the reference
//! tool's own behavior here and collects every coordinate pair after
//! `coordinates` into a single polyline (see DESIGN.md).

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use adbus_core::diagnostics::ParseDiagnostics;
use adbus_core::{AdbusError, AdbusResult, Id, Route, TIMESLOTS};

use crate::tokenizer::{consume_point_run, is_feature_line, tokenize_line};

/// Parse every `type Feature` line of `path` into a `Route`.
pub fn parse_routes(path: &Path) -> AdbusResult<(Vec<Route>, ParseDiagnostics)> {
    let source = path.display().to_string();
    let contents = fs::read_to_string(path)?;

    let mut routes = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut diagnostics = ParseDiagnostics::new();

    for line in contents.lines() {
        let tokens = tokenize_line(line);
        if !is_feature_line(&tokens) {
            continue;
        }

        let route = parse_route_feature(&tokens, &source)?;
        if !seen_ids.insert(route.output_id.clone()) {
            return Err(AdbusError::duplicate_id(source, route.output_id.to_string()));
        }
        diagnostics.stats.features += 1;
        routes.push(route);
    }

    Ok((routes, diagnostics))
}

fn parse_route_feature(tokens: &[String], source: &str) -> AdbusResult<Route> {
    let mut output_id: Option<String> = None;
    let mut cost: Option<f64> = None;
    let mut buses = [0u32; TIMESLOTS];
    let mut polyline = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i].as_str() {
            "RouteID" => {
                let value = tokens
                    .get(i + 1)
                    .ok_or_else(|| AdbusError::structural(source, "RouteID has no value"))?;
                output_id = Some(value.clone());
                i += 2;
            }
            "Cost" => {
                let value = tokens
                    .get(i + 1)
                    .ok_or_else(|| AdbusError::structural(source, "Cost has no value"))?;
                cost = Some(value.parse().map_err(|_| {
                    AdbusError::structural(source, format!("Cost {value:?} is not a number"))
                })?);
                i += 2;
            }
            "TZ2_Max" => {
                buses[0] = parse_bus_cap(tokens, i, "TZ2_Max", source)?;
                i += 2;
            }
            "TZ3_Max" => {
                buses[1] = parse_bus_cap(tokens, i, "TZ3_Max", source)?;
                i += 2;
            }
            "TZ4_Max" => {
                buses[2] = parse_bus_cap(tokens, i, "TZ4_Max", source)?;
                i += 2;
            }
            "coordinates" => {
                let (points, next) = consume_point_run(tokens, i + 1);
                polyline = points;
                i = next;
            }
            _ => i += 1,
        }
    }

    let output_id =
        output_id.ok_or_else(|| AdbusError::structural(source, "feature is missing RouteID"))?;
    let cost = cost.ok_or_else(|| {
        AdbusError::structural(source, format!("route {output_id} is missing Cost"))
    })?;
    if !cost.is_finite() || cost <= 0.0 {
        return Err(AdbusError::numeric_boundary(
            source,
            format!("route {output_id} has non-positive cost {cost}"),
        ));
    }
    if polyline.len() < 2 {
        return Err(AdbusError::structural(
            source,
            format!("route {output_id} has a degenerate polyline"),
        ));
    }

    Ok(Route::new(Id::new(output_id), cost, buses, vec![polyline]))
}

fn parse_bus_cap(tokens: &[String], i: usize, key: &str, source: &str) -> AdbusResult<u32> {
    let value = tokens
        .get(i + 1)
        .ok_or_else(|| AdbusError::structural(source, format!("{key} has no value")))?;
    value
        .parse()
        .map_err(|_| AdbusError::structural(source, format!("{key} {value:?} is not a non-negative integer")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const FIXTURE: &str = r#"{"type": "Feature", "properties": {"RouteID": "R1", "Cost": "1500.0", "TZ2_Max": "2", "TZ3_Max": "3", "TZ4_Max": "1"}, "geometry": {"coordinates": [[0,0],[10,0],[10,10]]}}"#;

    #[test]
    fn test_parses_single_route() {
        let file = write_fixture(FIXTURE);
        let (routes, diagnostics) = parse_routes(file.path()).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(diagnostics.stats.features, 1);
        let route = &routes[0];
        assert_eq!(route.output_id.as_str(), "R1");
        assert_eq!(route.cost, 1500.0);
        assert_eq!(route.buses, [2, 3, 1]);
        assert_eq!(route.polylines.len(), 1);
        assert_eq!(route.polylines[0].len(), 3);
    }

    #[test]
    fn test_non_positive_cost_is_numeric_boundary_error() {
        let bad = FIXTURE.replace("\"1500.0\"", "\"0\"");
        let file = write_fixture(&bad);
        let result = parse_routes(file.path());
        assert!(matches!(result, Err(AdbusError::NumericBoundary { .. })));
    }

    #[test]
    fn test_duplicate_route_id_is_an_error() {
        let contents = format!("{FIXTURE}\n{FIXTURE}\n");
        let file = write_fixture(&contents);
        let result = parse_routes(file.path());
        assert!(matches!(result, Err(AdbusError::DuplicateId { .. })));
    }

    #[test]
    fn test_missing_route_id_is_an_error() {
        let bad = r#"{"type": "Feature", "properties": {"Cost": "10"}, "geometry": {"coordinates": [[0,0],[1,1]]}}"#;
        let file = write_fixture(bad);
        let result = parse_routes(file.path());
        assert!(matches!(result, Err(AdbusError::Structural { .. })));
    }

    #[test]
    fn test_degenerate_polyline_is_an_error() {
        let bad = r#"{"type": "Feature", "properties": {"RouteID": "R1", "Cost": "10", "TZ2_Max": "1", "TZ3_Max": "1", "TZ4_Max": "1"}, "geometry": {"coordinates": [[0,0]]}}"#;
        let file = write_fixture(bad);
        let result = parse_routes(file.path());
        assert!(matches!(result, Err(AdbusError::Structural { .. })));
    }
}
