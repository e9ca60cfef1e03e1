use serde::Serialize;

use crate::matching::keywords::KeywordSet;

/// Overlap between the resume and job-description keyword sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Terms present in both sets.
    pub matched: KeywordSet,
    /// Job terms the resume never mentions.
    pub missing: KeywordSet,
}

pub fn match_keywords(resume_keywords: &KeywordSet, job_keywords: &KeywordSet) -> MatchResult {
    MatchResult {
        matched: resume_keywords.intersection(job_keywords).cloned().collect(),
        missing: job_keywords.difference(resume_keywords).cloned().collect(),
    }
}
