//! Line tokenizer for the regions and routes feature files.
//!
//! The files are loosely GeoJSON-shaped, but the parser here never builds a
//! JSON tree: every character that isn't alphanumeric, `.`, or `_` is
//! replaced with a space, then the line is split on whitespace. A `"type":
//! "Feature"` pair in the source survives this as the adjacent tokens `type`
//! `Feature`, which is what marks a line as worth parsing.

/// Replace every non-alphanumeric, non-`.`, non-`_` character with a space
/// and split the result on whitespace.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let cleaned: String = line
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// True iff `tokens` begins with `type Feature`.
pub fn is_feature_line(tokens: &[String]) -> bool {
    tokens.len() >= 2 && tokens[0] == "type" && tokens[1] == "Feature"
}

/// Consume consecutive `(x, y)` numeric pairs starting at `start`, stopping
/// at the first token that isn't parseable as `f64` (or at end of input).
/// Returns the points collected and the index just past the last consumed
/// token.
pub fn consume_point_run(tokens: &[String], start: usize) -> (Vec<adbus_core::Point>, usize) {
    let mut points = Vec::new();
    let mut i = start;
    while i + 1 < tokens.len() {
        let x: Result<f64, _> = tokens[i].parse();
        let y: Result<f64, _> = tokens[i + 1].parse();
        match (x, y) {
            (Ok(x), Ok(y)) => {
                points.push(adbus_core::Point::new(x, y));
                i += 2;
            }
            _ => break,
        }
    }
    (points, i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_punctuation() {
        let tokens = tokenize_line(r#"{"type": "Feature", "properties": {"MESH_ID": "A1"}}"#);
        assert_eq!(tokens[0], "type");
        assert_eq!(tokens[1], "Feature");
        assert!(tokens.contains(&"MESH_ID".to_string()));
        assert!(tokens.contains(&"A1".to_string()));
    }

    #[test]
    fn test_tokenize_keeps_underscore_and_dot() {
        let tokens = tokenize_line("G1_TZ2 3.5");
        assert_eq!(tokens, vec!["G1_TZ2".to_string(), "3.5".to_string()]);
    }

    #[test]
    fn test_is_feature_line() {
        assert!(is_feature_line(&["type".into(), "Feature".into()]));
        assert!(!is_feature_line(&["type".into(), "FeatureCollection".into()]));
        assert!(!is_feature_line(&["MESH_ID".into()]));
    }

    #[test]
    fn test_consume_point_run_stops_at_non_numeric() {
        let tokens: Vec<String> = "0 0 10 0 10 10 MESH_ID A1"
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let (points, next) = consume_point_run(&tokens, 0);
        assert_eq!(points.len(), 3);
        assert_eq!(tokens[next], "MESH_ID");
    }
}
