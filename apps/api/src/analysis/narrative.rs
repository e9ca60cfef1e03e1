//! Qualitative assessment: asks the model for a sectioned narrative and parses
//! it into a fixed-shape `AssessmentReport`.
//!
//! Parsing is a line-oriented state machine. Each trimmed line is classified
//! into a `Line`, then `transition` maps (current section, line) to the next
//! section and at most one `Emit`. The machine always consumes the whole input.

use std::time::Duration;

use serde::Serialize;

use crate::analysis::domain::Domain;
use crate::analysis::outcome::{with_timeout, Outcome};
use crate::analysis::prompts::{
    CANDIDATE_PLACEHOLDER, NARRATIVE_JD_CHARS, NARRATIVE_MAX_KEYWORDS, NARRATIVE_PROMPT_TEMPLATE,
    NARRATIVE_SYSTEM,
};
use crate::llm_client::prompts::char_prefix;
use crate::llm_client::TextGenerator;
use crate::matching::keywords::KeywordSet;

pub const FALLBACK_SUMMARY: &str = "Unable to generate analysis. Ensure keywords are relevant.";
const FALLBACK_STRENGTHS: &str = "Strengths could not be assessed.";
const FALLBACK_WEAKNESSES: &str = "Weaknesses could not be assessed.";
const FALLBACK_SUGGESTIONS: &str =
    "Tailor your resume to the job description and retry the analysis.";
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Swot {
    pub strengths: String,
    pub weaknesses: String,
    pub opportunities: String,
    pub threats: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssessmentReport {
    pub summary: String,
    pub strengths: String,
    pub weaknesses: String,
    pub suggestions: String,
    pub swot: Swot,
}

impl AssessmentReport {
    /// Report used when the narrative collaborator cannot be reached.
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            strengths: FALLBACK_STRENGTHS.to_string(),
            weaknesses: FALLBACK_WEAKNESSES.to_string(),
            suggestions: FALLBACK_SUGGESTIONS.to_string(),
            swot: Swot {
                strengths: NOT_AVAILABLE.to_string(),
                weaknesses: NOT_AVAILABLE.to_string(),
                opportunities: NOT_AVAILABLE.to_string(),
                threats: NOT_AVAILABLE.to_string(),
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// State machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    None,
    Summary,
    Strengths,
    Weaknesses,
    Suggestions,
    Swot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    Strengths,
    Weaknesses,
    Opportunities,
    Threats,
}

const HEADINGS: [(&str, Section); 5] = [
    ("### Summary", Section::Summary),
    ("### Strengths", Section::Strengths),
    ("### Weaknesses", Section::Weaknesses),
    ("### Suggestions", Section::Suggestions),
    ("### SWOT", Section::Swot),
];

const QUADRANT_LABELS: [(&str, Quadrant); 4] = [
    ("**Strengths:**", Quadrant::Strengths),
    ("**Weaknesses:**", Quadrant::Weaknesses),
    ("**Opportunities:**", Quadrant::Opportunities),
    ("**Threats:**", Quadrant::Threats),
];

/// A trimmed input line, classified independently of the current section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Heading(Section),
    /// Bolded SWOT label with its trimmed inline content and the whole line.
    QuadrantLabel {
        quadrant: Quadrant,
        content: &'a str,
        line: &'a str,
    },
    Text(&'a str),
}

impl<'a> Line<'a> {
    pub fn classify(raw: &'a str) -> Self {
        let line = raw.trim();
        if line.is_empty() {
            return Line::Blank;
        }
        if let Some((_, section)) = HEADINGS.iter().find(|(marker, _)| line.starts_with(*marker)) {
            return Line::Heading(*section);
        }
        if let Some((label, quadrant)) = QUADRANT_LABELS
            .iter()
            .find(|(label, _)| line.starts_with(*label))
        {
            return Line::QuadrantLabel {
                quadrant: *quadrant,
                content: line[label.len()..].trim(),
                line,
            };
        }
        Line::Text(line)
    }
}

/// Output of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit<'a> {
    Nothing,
    Append(Section, &'a str),
    SetQuadrant(Quadrant, &'a str),
}

/// The single transition function of the parser.
pub fn transition(state: Section, line: Line<'_>) -> (Section, Emit<'_>) {
    match (state, line) {
        (_, Line::Heading(section)) => (section, Emit::Nothing),
        (Section::Swot, Line::QuadrantLabel { quadrant, content, .. }) => {
            (Section::Swot, Emit::SetQuadrant(quadrant, content))
        }
        (Section::None | Section::Swot, _) | (_, Line::Blank) => (state, Emit::Nothing),
        // A bolded label outside SWOT is ordinary body text.
        (_, Line::QuadrantLabel { line: text, .. } | Line::Text(text)) => {
            (state, Emit::Append(state, text))
        }
    }
}

/// Parses a narrative into a report. Unvisited fields stay empty strings.
pub fn parse_assessment(raw_text: &str) -> AssessmentReport {
    let mut report = AssessmentReport::default();
    let mut state = Section::None;

    for raw_line in raw_text.lines() {
        let (next, emit) = transition(state, Line::classify(raw_line));
        match emit {
            Emit::Nothing => {}
            Emit::Append(section, text) => append(&mut report, section, text),
            Emit::SetQuadrant(quadrant, content) => {
                *quadrant_field(&mut report.swot, quadrant) = content.to_string();
            }
        }
        state = next;
    }

    report
}

fn append(report: &mut AssessmentReport, section: Section, text: &str) {
    let field = match section {
        Section::Summary => &mut report.summary,
        Section::Strengths => &mut report.strengths,
        Section::Weaknesses => &mut report.weaknesses,
        Section::Suggestions => &mut report.suggestions,
        Section::None | Section::Swot => return,
    };
    if !field.is_empty() {
        field.push('\n');
    }
    field.push_str(text);
}

fn quadrant_field(swot: &mut Swot, quadrant: Quadrant) -> &mut String {
    match quadrant {
        Quadrant::Strengths => &mut swot.strengths,
        Quadrant::Weaknesses => &mut swot.weaknesses,
        Quadrant::Opportunities => &mut swot.opportunities,
        Quadrant::Threats => &mut swot.threats,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// Inputs that seed the narrative prompt.
pub struct NarrativeRequest<'a> {
    pub missing_keywords: &'a KeywordSet,
    pub job_description: &'a str,
    pub domain: Domain,
    pub candidate_name: Option<&'a str>,
}

pub fn build_narrative_prompt(request: &NarrativeRequest<'_>) -> String {
    let missing = if request.missing_keywords.is_empty() {
        "(none)".to_string()
    } else {
        request
            .missing_keywords
            .iter()
            .take(NARRATIVE_MAX_KEYWORDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    NARRATIVE_PROMPT_TEMPLATE
        .replace(
            "{candidate}",
            request.candidate_name.unwrap_or(CANDIDATE_PLACEHOLDER),
        )
        .replace("{domain}", request.domain.as_str())
        .replace("{missing_keywords}", &missing)
        .replace(
            "{jd_text}",
            char_prefix(request.job_description, NARRATIVE_JD_CHARS),
        )
}

/// Generates and parses the assessment. Never fails: a collaborator error
/// yields `AssessmentReport::fallback()`.
pub async fn generate_assessment(
    generator: &dyn TextGenerator,
    request: &NarrativeRequest<'_>,
    timeout: Duration,
) -> Outcome<AssessmentReport> {
    let prompt = build_narrative_prompt(request);

    match with_timeout(timeout, generator.generate(&prompt, NARRATIVE_SYSTEM)).await {
        Ok(raw) => Outcome::Produced(parse_assessment(&raw)),
        Err(e) => Outcome::fallback(
            AssessmentReport::fallback(),
            format!("narrative generation failed: {e}"),
        ),
    }
}
