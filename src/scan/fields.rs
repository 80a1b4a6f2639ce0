//! Line classification and attribute extraction for the trace format.
//!
//! The trace is line-oriented: one tag per line, attributes as
//! `name="value"`. Extraction works directly on the line without regexes
//! or allocation, since it runs once per sample on traces with hundreds of
//! millions of lines.

/// Cheap structural classification, done before any field extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Timestep boundary carrying a `time` attribute.
    Boundary,
    /// Vehicle sample carrying id/lane/position/speed attributes.
    Vehicle,
    Other,
}

pub fn classify(line: &str) -> LineKind {
    if line.contains("<timestep") {
        LineKind::Boundary
    } else if line.contains("<vehicle") {
        LineKind::Vehicle
    } else {
        LineKind::Other
    }
}

/// Extracts the value of `name="..."` from a tag line.
///
/// Matches on attribute-name boundaries, so `id` never matches inside
/// `parentid`. Returns `None` when the attribute is absent or missing its
/// closing quote; callers treat that as "skip this record".
pub fn attr<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    debug_assert!(!name.is_empty());
    let bytes = line.as_bytes();
    let mut search = 0;
    while let Some(found) = line[search..].find(name) {
        let start = search + found;
        let after = start + name.len();
        let at_boundary = start == 0 || {
            let prev = bytes[start - 1];
            !(prev.is_ascii_alphanumeric() || prev == b'_')
        };
        if at_boundary && line[after..].starts_with("=\"") {
            let value_start = after + 2;
            let value_len = line[value_start..].find('"')?;
            return Some(&line[value_start..value_start + value_len]);
        }
        search = after;
    }
    None
}

pub fn attr_f64(line: &str, name: &str) -> Option<f64> {
    attr(line, name).and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str =
        r#"    <vehicle id="veh_12" x="28.834511" y="46.971203" lane="405#1_0" speed="8.33"/>"#;

    #[test]
    fn classifies_boundary_and_sample_lines() {
        assert_eq!(classify(r#"  <timestep time="25200.00">"#), LineKind::Boundary);
        assert_eq!(classify(SAMPLE), LineKind::Vehicle);
        assert_eq!(classify("</fcd-export>"), LineKind::Other);
    }

    #[test]
    fn extracts_attributes_by_name() {
        assert_eq!(attr(SAMPLE, "id"), Some("veh_12"));
        assert_eq!(attr(SAMPLE, "lane"), Some("405#1_0"));
        assert_eq!(attr_f64(SAMPLE, "speed"), Some(8.33));
        assert_eq!(attr(SAMPLE, "angle"), None);
    }

    #[test]
    fn short_names_do_not_match_inside_longer_ones() {
        let line = r#"<vehicle parentid="bus_1" id="veh_2"/>"#;
        assert_eq!(attr(line, "id"), Some("veh_2"));
    }

    #[test]
    fn malformed_values_yield_none() {
        assert_eq!(attr(r#"<vehicle id="unterminated"#, "id"), None);
        assert_eq!(attr_f64(r#"<vehicle speed="fast"/>"#, "speed"), None);
    }
}
