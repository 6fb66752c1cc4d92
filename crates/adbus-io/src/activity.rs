//! Activity-factors CSV parser.
//!
//! The reference tool treats this file as a header line followed by exactly
//! one data line of three comma-separated probabilities. A `csv::Reader`
//! with headers enabled gives us the header-skipping for free; only the
//! first data record is read (see the same `ReaderBuilder` idiom used for
//! tariff CSVs elsewhere in this workspace).

use std::path::Path;

use adbus_core::{AdbusError, AdbusResult, TIMESLOTS};

/// Parse the single data line of the activity-factors CSV into per-slot
/// activity probabilities, each expected in `(0, 1]`.
pub fn parse_activity_factors(path: &Path) -> AdbusResult<[f64; TIMESLOTS]> {
    let source = path.display().to_string();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| AdbusError::structural(&source, e.to_string()))?;

    let record = reader
        .records()
        .next()
        .ok_or_else(|| AdbusError::structural(&source, "activity CSV has no data line"))?
        .map_err(|e| AdbusError::structural(&source, e.to_string()))?;

    if record.len() < TIMESLOTS {
        return Err(AdbusError::structural(
            &source,
            format!("activity CSV data line has only {} fields, need {TIMESLOTS}", record.len()),
        ));
    }

    let mut factors = [0.0; TIMESLOTS];
    for (slot, factor) in factors.iter_mut().enumerate() {
        let raw = record[slot].trim();
        let value: f64 = raw.parse().map_err(|_| {
            AdbusError::structural(&source, format!("activity factor {raw:?} is not a number"))
        })?;
        if !(value > 0.0 && value <= 1.0) {
            return Err(AdbusError::numeric_boundary(
                &source,
                format!("activity factor {value} is out of range (0, 1]"),
            ));
        }
        *factor = value;
    }

    Ok(factors)
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

    #[test]
    fn test_parses_three_factors() {
        let file = write_fixture("slot2,slot3,slot4\n0.2,0.5,0.9\n");
        let factors = parse_activity_factors(file.path()).unwrap();
        assert_eq!(factors, [0.2, 0.5, 0.9]);
    }

    #[test]
    fn test_factor_above_one_is_numeric_boundary_error() {
        let file = write_fixture("slot2,slot3,slot4\n0.2,0.5,1.5\n");
        let result = parse_activity_factors(file.path());
        assert!(matches!(result, Err(AdbusError::NumericBoundary { .. })));
    }

    #[test]
    fn test_zero_factor_is_numeric_boundary_error() {
        let file = write_fixture("slot2,slot3,slot4\n0.0,0.5,0.9\n");
        let result = parse_activity_factors(file.path());
        assert!(matches!(result, Err(AdbusError::NumericBoundary { .. })));
    }

    #[test]
    fn test_missing_data_line_is_structural_error() {
        let file = write_fixture("slot2,slot3,slot4\n");
        let result = parse_activity_factors(file.path());
        assert!(matches!(result, Err(AdbusError::Structural { .. })));
    }
}
