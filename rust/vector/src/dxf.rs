// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimal DXF line extraction.
//!
//! Reads only what reconstruction needs: LINE entities inside the
//! ENTITIES section of an ASCII DXF file. Everything else (other
//! entity kinds, other sections, unknown group codes) is skipped
//! without complaint, so exports from different CAD tools keep
//! working as long as their walls are plain lines.

use crate::error::Result;
use crate::types::Segment;
use planvec_scene::Point2D;
use std::fs;
use std::path::Path;

/// Partially read LINE entity, flushed when the next entity begins
#[derive(Debug, Default)]
struct PendingLine {
    x1: Option<f64>,
    y1: Option<f64>,
    x2: Option<f64>,
    y2: Option<f64>,
}

impl PendingLine {
    fn set(&mut self, code: &str, value: f64) {
        match code {
            "10" => self.x1 = Some(value),
            "20" => self.y1 = Some(value),
            "11" => self.x2 = Some(value),
            "21" => self.y2 = Some(value),
            _ => {}
        }
    }

    fn into_segment(self) -> Option<Segment> {
        match (self.x1, self.y1, self.x2, self.y2) {
            (Some(x1), Some(y1), Some(x2), Some(y2)) => Some(Segment::new(
                Point2D::new(x1, y1),
                Point2D::new(x2, y2),
            )),
            _ => None,
        }
    }
}

/// Extract LINE segments from ASCII DXF content.
///
/// DXF is a sequence of group-code / value line pairs. Incomplete line
/// entities (missing an endpoint coordinate) are dropped.
pub fn parse_dxf_lines(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut lines = content.lines();

    let mut in_entities = false;
    let mut awaiting_section_name = false;
    let mut current: Option<PendingLine> = None;

    while let (Some(code), Some(value)) = (lines.next(), lines.next()) {
        let code = code.trim();
        let value = value.trim();

        match code {
            "0" => {
                if let Some(pending) = current.take() {
                    if let Some(segment) = pending.into_segment() {
                        segments.push(segment);
                    }
                }
                awaiting_section_name = value == "SECTION";
                match value {
                    "ENDSEC" | "EOF" => in_entities = false,
                    "LINE" if in_entities => current = Some(PendingLine::default()),
                    _ => {}
                }
            }
            "2" if awaiting_section_name => {
                in_entities = value == "ENTITIES";
                awaiting_section_name = false;
            }
            "10" | "20" | "11" | "21" => {
                if let (Some(pending), Ok(parsed)) = (current.as_mut(), value.parse::<f64>()) {
                    pending.set(code, parsed);
                }
            }
            _ => {}
        }
    }

    if let Some(pending) = current.take() {
        if let Some(segment) = pending.into_segment() {
            segments.push(segment);
        }
    }

    segments
}

/// Read a DXF file and extract its LINE segments
pub fn read_dxf_lines<P: AsRef<Path>>(path: P) -> Result<Vec<Segment>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_dxf_lines(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dxf(pairs: &[(&str, &str)]) -> String {
        let mut out = String::new();
        for (code, value) in pairs {
            out.push_str(code);
            out.push('\n');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_parse_extracts_lines_from_entities() {
        let content = dxf(&[
            ("0", "SECTION"),
            ("2", "HEADER"),
            ("0", "ENDSEC"),
            ("0", "SECTION"),
            ("2", "ENTITIES"),
            ("0", "LINE"),
            ("8", "walls"),
            ("10", "0.0"),
            ("20", "0.0"),
            ("11", "10.0"),
            ("21", "0.0"),
            ("0", "LINE"),
            ("10", "10.0"),
            ("20", "0.0"),
            ("11", "10.0"),
            ("21", "10.0"),
            ("0", "ENDSEC"),
            ("0", "EOF"),
        ]);

        let segments = parse_dxf_lines(&content);

        assert_eq!(segments.len(), 2);
        assert_relative_eq!(segments[0].end.x, 10.0);
        assert_relative_eq!(segments[1].start.x, 10.0);
        assert_relative_eq!(segments[1].end.y, 10.0);
    }

    #[test]
    fn test_parse_skips_other_entities() {
        let content = dxf(&[
            ("0", "SECTION"),
            ("2", "ENTITIES"),
            ("0", "CIRCLE"),
            ("10", "5.0"),
            ("20", "5.0"),
            ("40", "2.5"),
            ("0", "LINE"),
            ("10", "1.0"),
            ("20", "2.0"),
            ("11", "3.0"),
            ("21", "4.0"),
            ("0", "ENDSEC"),
        ]);

        let segments = parse_dxf_lines(&content);

        assert_eq!(segments.len(), 1);
        assert_relative_eq!(segments[0].start.x, 1.0);
        assert_relative_eq!(segments[0].end.y, 4.0);
    }

    #[test]
    fn test_parse_ignores_lines_outside_entities() {
        let content = dxf(&[
            ("0", "SECTION"),
            ("2", "BLOCKS"),
            ("0", "LINE"),
            ("10", "0.0"),
            ("20", "0.0"),
            ("11", "1.0"),
            ("21", "1.0"),
            ("0", "ENDSEC"),
        ]);

        assert!(parse_dxf_lines(&content).is_empty());
    }

    #[test]
    fn test_parse_drops_incomplete_line() {
        let content = dxf(&[
            ("0", "SECTION"),
            ("2", "ENTITIES"),
            ("0", "LINE"),
            ("10", "0.0"),
            ("20", "0.0"),
            ("11", "not-a-number"),
            ("0", "ENDSEC"),
        ]);

        assert!(parse_dxf_lines(&content).is_empty());
    }

    #[test]
    fn test_parse_empty_content() {
        assert!(parse_dxf_lines("").is_empty());
        assert!(parse_dxf_lines("0\nEOF\n").is_empty());
    }

    #[test]
    fn test_parse_tolerates_crlf() {
        let content = "0\r\nSECTION\r\n2\r\nENTITIES\r\n0\r\nLINE\r\n10\r\n0.0\r\n20\r\n0.0\r\n11\r\n5.0\r\n21\r\n5.0\r\n0\r\nEOF\r\n";
        let segments = parse_dxf_lines(content);
        assert_eq!(segments.len(), 1);
        assert_relative_eq!(segments[0].end.x, 5.0);
    }
}
