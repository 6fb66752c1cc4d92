//! Regions-file parser.
//!
//! Grounded in the original tool's `parse::region`/`parse::allRegions`: a
//! line-oriented scan for `type Feature` lines, each of which carries a
//! `MESH_ID`, a closed `coordinates` polygon, and zero or more
//! `G<age>_TZ<slot>` demographic counts that get folded into `targets` right
//! here at parse time (see the region-target formula in `adbus-algo`'s
//! module docs).

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use adbus_core::diagnostics::ParseDiagnostics;
use adbus_core::{AdbusError, AdbusResult, Id, Region, SLOT_LENGTH, TIMESLOTS};

use crate::tokenizer::{consume_point_run, is_feature_line, tokenize_line};

/// Parse every `type Feature` line of `path` into a `Region`, folding
/// demographic counts into `targets` as they're encountered.
///
/// `target_ages` is the set of single-character age-group codes requested on
/// the command line; `active_factors` is the per-slot activity probability
/// from the activity CSV.
///
/// Returns on the first malformed feature, duplicate `MESH_ID`, or
/// out-of-range value: the parser is a trust boundary, not a best-effort
/// importer, per the fatal error taxonomy.
pub fn parse_regions(
    path: &Path,
    target_ages: &str,
    active_factors: [f64; TIMESLOTS],
) -> AdbusResult<(Vec<Region>, ParseDiagnostics)> {
    let source = path.display().to_string();
    let contents = fs::read_to_string(path)?;

    let mut regions = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut diagnostics = ParseDiagnostics::new();

    for line in contents.lines() {
        let tokens = tokenize_line(line);
        if !is_feature_line(&tokens) {
            continue;
        }

        let region = parse_region_feature(&tokens, &source, target_ages, active_factors)?;
        if !seen_ids.insert(region.mesh_id.clone()) {
            return Err(AdbusError::duplicate_id(
                source,
                region.mesh_id.to_string(),
            ));
        }
        diagnostics.stats.features += 1;
        regions.push(region);
    }

    Ok((regions, diagnostics))
}

fn parse_region_feature(
    tokens: &[String],
    source: &str,
    target_ages: &str,
    active_factors: [f64; TIMESLOTS],
) -> AdbusResult<Region> {
    let mut mesh_id: Option<String> = None;
    let mut targets = [0.0; TIMESLOTS];
    let mut polygon = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();

        if token == "MESH_ID" {
            let value = tokens
                .get(i + 1)
                .ok_or_else(|| AdbusError::structural(source, "MESH_ID has no value"))?;
            mesh_id = Some(value.clone());
            i += 2;
            continue;
        }

        if let Some((age, slot)) = age_timeslot_key(token) {
            let value = tokens
                .get(i + 1)
                .ok_or_else(|| AdbusError::structural(source, format!("{token} has no value")))?;
            if target_ages.contains(age) {
                if let Some(slot) = slot {
                    let count: f64 = value.parse().map_err(|_| {
                        AdbusError::structural(source, format!("{token} has non-numeric count"))
                    })?;
                    targets[slot] += count * active_factors[slot] * SLOT_LENGTH[slot];
                }
            }
            i += 2;
            continue;
        }

        if token == "coordinates" {
            let (points, next) = consume_point_run(tokens, i + 1);
            polygon = points;
            i = next;
            continue;
        }

        i += 1;
    }

    let mesh_id =
        mesh_id.ok_or_else(|| AdbusError::structural(source, "feature is missing MESH_ID"))?;

    if polygon.len() < 2 {
        return Err(AdbusError::structural(
            source,
            format!("region {mesh_id} has a degenerate polygon"),
        ));
    }
    if polygon.first() != polygon.last() {
        return Err(AdbusError::structural(
            source,
            format!("region {mesh_id} has an open polygon"),
        ));
    }

    Ok(Region::new(Id::new(mesh_id), targets, polygon))
}

/// Match a `G<age>_TZ<slot>` token, returning the age character and the
/// internal slot index (`None` when the token refers to the always-zero
/// sentinel slot 1, which is recognized but ignored).
fn age_timeslot_key(token: &str) -> Option<(char, Option<usize>)> {
    let bytes = token.as_bytes();
    if bytes.len() != 6 || bytes[0] != b'G' || bytes[2] != b'_' || bytes[3] != b'T' || bytes[4] != b'Z'
    {
        return None;
    }
    if !bytes[1].is_ascii_digit() || !bytes[5].is_ascii_digit() {
        return None;
    }

    let age = bytes[1] as char;
    let external_slot = (bytes[5] - b'0') as i32;
    let internal_slot = external_slot - 2;
    if internal_slot < 0 {
        return Some((age, None));
    }
    if internal_slot as usize >= TIMESLOTS {
        return None;
    }
    Some((age, Some(internal_slot as usize)))
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

    const FIXTURE: &str = r#"{"type": "Feature", "properties": {"MESH_ID": "A1", "G1_TZ2": "10", "G1_TZ3": "20", "G2_TZ2": "5"}, "geometry": {"coordinates": [[0,0],[10,0],[10,10],[0,10],[0,0]]}}"#;

    #[test]
    fn test_parses_single_region_with_matching_age() {
        let file = write_fixture(FIXTURE);
        let (regions, diagnostics) =
            parse_regions(file.path(), "1", [1.0, 1.0, 1.0]).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(diagnostics.stats.features, 1);
        let region = &regions[0];
        assert_eq!(region.mesh_id.as_str(), "A1");
        // slot 0 (TZ2): 10 * 1.0 * SLOT_LENGTH[0] = 20
        assert_eq!(region.targets[0], 10.0 * SLOT_LENGTH[0]);
        // slot 1 (TZ3): 20 * 1.0 * SLOT_LENGTH[1]
        assert_eq!(region.targets[1], 20.0 * SLOT_LENGTH[1]);
        // age 2 not requested, contributes nothing
        assert_eq!(region.targets[2], 0.0);
    }

    #[test]
    fn test_ignores_ages_outside_target_set() {
        let file = write_fixture(FIXTURE);
        let (regions, _) = parse_regions(file.path(), "9", [1.0, 1.0, 1.0]).unwrap();
        assert_eq!(regions[0].targets, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_duplicate_mesh_id_is_an_error() {
        let contents = format!("{FIXTURE}\n{FIXTURE}\n");
        let file = write_fixture(&contents);
        let result = parse_regions(file.path(), "1", [1.0, 1.0, 1.0]);
        assert!(matches!(result, Err(AdbusError::DuplicateId { .. })));
    }

    #[test]
    fn test_open_polygon_is_an_error() {
        let bad = r#"{"type": "Feature", "properties": {"MESH_ID": "A1"}, "geometry": {"coordinates": [[0,0],[10,0],[10,10]]}}"#;
        let file = write_fixture(bad);
        let result = parse_regions(file.path(), "1", [1.0, 1.0, 1.0]);
        assert!(matches!(result, Err(AdbusError::Structural { .. })));
    }

    #[test]
    fn test_missing_mesh_id_is_an_error() {
        let bad = r#"{"type": "Feature", "properties": {}, "geometry": {"coordinates": [[0,0],[10,0],[10,10],[0,0]]}}"#;
        let file = write_fixture(bad);
        let result = parse_regions(file.path(), "1", [1.0, 1.0, 1.0]);
        assert!(matches!(result, Err(AdbusError::Structural { .. })));
    }

    #[test]
    fn test_non_feature_lines_are_skipped() {
        let contents = format!("{{\"type\": \"FeatureCollection\"}}\n{FIXTURE}\n");
        let file = write_fixture(&contents);
        let (regions, _) = parse_regions(file.path(), "1", [1.0, 1.0, 1.0]).unwrap();
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn test_sentinel_slot_one_is_recognized_but_ignored() {
        assert_eq!(age_timeslot_key("G1_TZ1"), Some(('1', None)));
        assert_eq!(age_timeslot_key("G1_TZ2"), Some(('1', Some(0))));
        assert_eq!(age_timeslot_key("G1_TZ4"), Some(('1', Some(2))));
        assert_eq!(age_timeslot_key("RouteID"), None);
    }
}
