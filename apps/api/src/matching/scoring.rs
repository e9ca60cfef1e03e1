//! Fit score: deterministic 0–100 score from keyword coverage, resume length,
//! and the presence of standard resume sections.
//!
//! Weights: keyword coverage 50, length 30, structure 20.

use serde::Serialize;

use crate::matching::keywords::KeywordSet;

const KEYWORD_WEIGHT: f64 = 50.0;
const STRUCTURE_WEIGHT: f64 = 20.0;

/// Section markers looked up as case-insensitive substrings of the resume.
const SECTION_MARKERS: [&str; 3] = ["skills", "experience", "education"];

const LENGTH_TOP: f64 = 30.0; // 500–1000 words
const LENGTH_NEAR: f64 = 20.0; // 300–499 or 1001–1500 words
const LENGTH_OTHER: f64 = 10.0;

/// Per-component contribution before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub keyword: f64,
    pub length: f64,
    pub structure: f64,
}

impl ScoreBreakdown {
    pub fn compute(resume_text: &str, matched: &KeywordSet, job_keywords: &KeywordSet) -> Self {
        Self {
            keyword: keyword_component(matched.len(), job_keywords.len()),
            length: length_component(word_count(resume_text)),
            structure: structure_component(resume_text),
        }
    }

    /// Sum of the components, rounded half-up and clamped to 0–100.
    pub fn total(&self) -> u8 {
        let sum = self.keyword + self.length + self.structure;
        // Components are non-negative, so `round` (half away from zero) is half-up here.
        sum.round().clamp(0.0, 100.0) as u8
    }
}

/// Scores a resume against the job keywords it matched.
#[cfg(test)]
pub fn score(resume_text: &str, matched: &KeywordSet, job_keywords: &KeywordSet) -> u8 {
    ScoreBreakdown::compute(resume_text, matched, job_keywords).total()
}

fn keyword_component(matched: usize, job_total: usize) -> f64 {
    if job_total == 0 {
        return 0.0;
    }
    matched as f64 / job_total as f64 * KEYWORD_WEIGHT
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn length_component(words: usize) -> f64 {
    match words {
        500..=1000 => LENGTH_TOP,
        300..=499 | 1001..=1500 => LENGTH_NEAR,
        _ => LENGTH_OTHER,
    }
}

fn structure_component(resume_text: &str) -> f64 {
    let lower = resume_text.to_lowercase();
    let present = SECTION_MARKERS
        .iter()
        .filter(|marker| lower.contains(*marker))
        .count();
    // Multiply before dividing: three sections give exactly 20.0.
    (present as f64 * STRUCTURE_WEIGHT / SECTION_MARKERS.len() as f64).min(STRUCTURE_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(terms: &[&str]) -> KeywordSet {
        terms.iter().map(|t| t.to_string()).collect()
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_length_boundaries() {
        assert_eq!(length_component(word_count(&words(500))), 30.0);
        assert_eq!(length_component(word_count(&words(1000))), 30.0);
        assert_eq!(length_component(word_count(&words(499))), 20.0);
        assert_eq!(length_component(word_count(&words(300))), 20.0);
        assert_eq!(length_component(word_count(&words(1001))), 20.0);
        assert_eq!(length_component(word_count(&words(1500))), 20.0);
        assert_eq!(length_component(word_count(&words(1501))), 10.0);
        assert_eq!(length_component(word_count(&words(299))), 10.0);
    }

    #[test]
    fn test_word_count_splits_on_any_whitespace() {
        assert_eq!(word_count("one\ttwo\n\nthree   four"), 4);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_structure_all_markers_caps_at_twenty() {
        let structure = structure_component("SKILLS ... Work Experience ... Education");
        assert_eq!(structure, 20.0);
    }

    #[test]
    fn test_structure_single_marker() {
        let structure = structure_component("Education: BS Computer Science");
        assert!((structure - 20.0 / 3.0).abs() < 1e-9);
        assert!(structure >= 6.66);
    }

    #[test]
    fn test_structure_marker_matches_inside_words() {
        // "Experienced" contains "experience".
        assert!(structure_component("Experienced engineer") > 0.0);
    }

    #[test]
    fn test_keyword_component_not_rounded() {
        assert!((keyword_component(1, 3) - 50.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_job_keywords_scores_zero_keyword_component() {
        let breakdown = ScoreBreakdown::compute("anything", &set(&[]), &set(&[]));
        assert_eq!(breakdown.keyword, 0.0);
    }

    #[test]
    fn test_empty_resume_scores_ten() {
        assert_eq!(score("", &set(&[]), &set(&[])), 10);
        assert_eq!(score("", &set(&[]), &set(&["rust", "axum"])), 10);
    }

    #[test]
    fn test_perfect_resume_scores_hundred() {
        let text = format!("skills experience education {}", words(600));
        let job = set(&["rust", "axum"]);
        assert_eq!(score(&text, &job, &job), 100);
    }

    #[test]
    fn test_rounds_half_up() {
        let breakdown = ScoreBreakdown {
            keyword: 12.5,
            length: 10.0,
            structure: 0.0,
        };
        assert_eq!(breakdown.total(), 23);
    }

    #[test]
    fn test_total_is_clamped() {
        let breakdown = ScoreBreakdown {
            keyword: 80.0,
            length: 30.0,
            structure: 20.0,
        };
        assert_eq!(breakdown.total(), 100);
    }

    #[test]
    fn test_scenario_score() {
        let resume = "Experienced Python developer with SQL skills. Education: BS Computer Science.";
        let job = set(&["python", "sql", "developer", "aws", "experience"]);
        let matched = set(&["python", "sql", "developer"]);
        // 30 keyword + 10 length (10 words) + 20 structure
        assert_eq!(score(resume, &matched, &job), 60);
    }
}
