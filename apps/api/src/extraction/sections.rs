//! Section extraction — classifies lines of decoded resume text into labeled
//! sections by case-insensitive header-keyword matching.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Advisory shown when no recognized section header was found in the text.
pub const NO_STRUCTURE_MESSAGE: &str =
    "No structured data found. Please ensure your resume has clearly labeled sections.";

/// A recognized resume section.
///
/// The variant order is the canonical order: it drives header tie-breaking
/// (first match wins) and the ordering of serialized summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    Skills,
    Achievements,
    Experience,
    Projects,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Skills,
        Section::Achievements,
        Section::Experience,
        Section::Projects,
    ];

    /// Header phrases that open this section when a line starts with one.
    pub fn header_synonyms(self) -> &'static [&'static str] {
        match self {
            Section::Skills => &["Skills", "Technical Skills", "Core Competencies"],
            Section::Achievements => &["Achievements", "Accomplishments", "Key Highlights"],
            Section::Experience => &["Experience", "Work Experience", "Professional Experience"],
            Section::Projects => &["Projects", "Key Projects", "Academic Projects"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Skills => "Skills",
            Section::Achievements => "Achievements",
            Section::Experience => "Experience",
            Section::Projects => "Projects",
        }
    }
}

/// Outcome of section extraction.
///
/// `NotFound` is distinct from a populated map so callers branch on "no
/// sections recognized" explicitly instead of inspecting an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResumeSummary {
    Found { sections: BTreeMap<Section, String> },
    NotFound,
}

/// Classifies `text` into labeled resume sections.
///
/// A line opens a section when it case-insensitively starts with one of that
/// section's header synonyms; the header line itself is never captured. Every
/// following line, blank lines included, belongs to the most recently opened
/// section. Lines before the first recognized header are dropped. Never fails
/// on any input: text with no recognized headers yields `NotFound`.
pub fn extract(text: &str) -> ResumeSummary {
    let mut captured: BTreeMap<Section, Vec<&str>> = BTreeMap::new();
    let mut current: Option<Section> = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(section) = match_header(line) {
            current = Some(section);
            continue;
        }
        if let Some(section) = current {
            captured.entry(section).or_default().push(line);
        }
    }

    if captured.is_empty() {
        return ResumeSummary::NotFound;
    }

    let sections = captured
        .into_iter()
        .map(|(section, lines)| (section, lines.join("\n")))
        .collect();
    ResumeSummary::Found { sections }
}

/// First section, in canonical order, with a synonym the line starts with.
fn match_header(line: &str) -> Option<Section> {
    let lower = line.to_lowercase();
    Section::ALL.into_iter().find(|section| {
        section
            .header_synonyms()
            .iter()
            .any(|synonym| lower.starts_with(&synonym.to_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(summary: &ResumeSummary) -> &BTreeMap<Section, String> {
        match summary {
            ResumeSummary::Found { sections } => sections,
            ResumeSummary::NotFound => panic!("expected Found, got NotFound"),
        }
    }

    #[test]
    fn test_two_labeled_sections() {
        let summary = extract("Skills\nPython, Go\nExperience\n3 years");
        let sections = found(&summary);
        assert_eq!(sections[&Section::Skills], "Python, Go");
        assert_eq!(sections[&Section::Experience], "3 years");
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_empty_text_is_not_found() {
        assert_eq!(extract(""), ResumeSummary::NotFound);
    }

    #[test]
    fn test_no_recognized_headers_is_not_found() {
        let summary = extract("John Doe\njohn@example.com\nEducation\nBS, 2019");
        assert_eq!(summary, ResumeSummary::NotFound);
    }

    #[test]
    fn test_header_line_is_never_captured() {
        let summary = extract("Skills\nRust");
        assert_eq!(found(&summary)[&Section::Skills], "Rust");
    }

    #[test]
    fn test_header_with_trailing_text_still_opens_section() {
        let summary = extract("Skills & Tools\nRust");
        assert_eq!(found(&summary)[&Section::Skills], "Rust");
    }

    #[test]
    fn test_headers_match_case_insensitively() {
        let summary = extract("SKILLS\nRust\nwork experience\nAcme Corp");
        let sections = found(&summary);
        assert_eq!(sections[&Section::Skills], "Rust");
        assert_eq!(sections[&Section::Experience], "Acme Corp");
    }

    #[test]
    fn test_synonyms_open_their_section() {
        let summary = extract(
            "Core Competencies\nLeadership\nKey Highlights\nPromoted twice\nAcademic Projects\nCompiler",
        );
        let sections = found(&summary);
        assert_eq!(sections[&Section::Skills], "Leadership");
        assert_eq!(sections[&Section::Achievements], "Promoted twice");
        assert_eq!(sections[&Section::Projects], "Compiler");
    }

    #[test]
    fn test_text_before_first_header_is_dropped() {
        let summary = extract("Jane Doe\nSenior Engineer\nSkills\nRust");
        let sections = found(&summary);
        assert_eq!(sections[&Section::Skills], "Rust");
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_blank_lines_are_kept_in_section_bodies() {
        let summary = extract("Skills\nRust\n\nGo");
        assert_eq!(found(&summary)[&Section::Skills], "Rust\n\nGo");
    }

    #[test]
    fn test_lines_are_trimmed() {
        let summary = extract("  Skills  \n   Rust   ");
        assert_eq!(found(&summary)[&Section::Skills], "Rust");
    }

    #[test]
    fn test_section_with_no_lines_is_omitted() {
        let summary = extract("Skills\nExperience\n5 years at Acme");
        let sections = found(&summary);
        assert!(!sections.contains_key(&Section::Skills));
        assert_eq!(sections[&Section::Experience], "5 years at Acme");
    }

    #[test]
    fn test_headers_only_is_not_found() {
        assert_eq!(extract("Skills\nExperience\nProjects"), ResumeSummary::NotFound);
    }

    #[test]
    fn test_reopening_a_section_accumulates_lines() {
        let summary = extract("Skills\nRust\nExperience\nAcme\nSkills\nGo");
        let sections = found(&summary);
        assert_eq!(sections[&Section::Skills], "Rust\nGo");
        assert_eq!(sections[&Section::Experience], "Acme");
    }

    #[test]
    fn test_extract_is_idempotent() {
        let text = "Skills\nRust\n\nProjects\nParser\nVM";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn test_match_header_prefers_canonical_order() {
        // Every synonym resolves to its own section; canonical order decides
        // which synonym table is consulted first.
        assert_eq!(match_header("Skills"), Some(Section::Skills));
        assert_eq!(match_header("Work Experience at Acme"), Some(Section::Experience));
        assert_eq!(match_header("Key Projects"), Some(Section::Projects));
        assert_eq!(match_header("Key Highlights of 2024"), Some(Section::Achievements));
        assert_eq!(match_header("References"), None);
    }

    #[test]
    fn test_summary_serializes_with_status_tag() {
        let summary = extract("Skills\nRust");
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"status":"found","sections":{"Skills":"Rust"}}"#);

        let missing = serde_json::to_string(&ResumeSummary::NotFound).unwrap();
        assert_eq!(missing, r#"{"status":"not_found"}"#);
    }

    #[test]
    fn test_sections_serialize_in_canonical_order() {
        let summary = extract("Projects\nParser\nSkills\nRust");
        let json = serde_json::to_string(&summary).unwrap();
        let skills = json.find("Skills").unwrap();
        let projects = json.find("Projects").unwrap();
        assert!(skills < projects, "Skills should precede Projects: {json}");
    }
}
