//! Match pipeline: resume text + job description → `MatchReport`.
//!
//! Steps:
//! 1. extract keywords from both texts
//! 2. matched / missing sets
//! 3. deterministic score
//! 4. domain classification and detail extraction (concurrently)
//! 5. narrative generation seeded with missing keywords, domain, candidate name
//!
//! Steps 4–5 call external collaborators. Each resolves to an `Outcome` and a
//! failure substitutes its fallback, so `run` itself cannot fail.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::details::{extract_details, ResumeDetails};
use crate::analysis::domain::{classify_domain, Domain};
use crate::analysis::narrative::{generate_assessment, AssessmentReport, NarrativeRequest};
use crate::llm_client::TextGenerator;
use crate::matching::keywords::{KeywordExtractor, KeywordSet};
use crate::matching::matcher::{match_keywords, MatchResult};
use crate::matching::scoring::ScoreBreakdown;

/// Word-cloud weight for terms the resume covers.
const CLOUD_MATCHED_WEIGHT: u32 = 30;
/// Word-cloud weight for terms the resume is missing.
const CLOUD_MISSING_WEIGHT: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloudTerm {
    pub term: String,
    pub weight: u32,
}

/// Full report returned to callers. Every field is always present; collaborator
/// failures are replaced by their fallback values.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub request_id: Uuid,
    pub matched_keywords: KeywordSet,
    pub missing_keywords: KeywordSet,
    pub details: ResumeDetails,
    pub assessment: AssessmentReport,
    pub score: u8,
    pub score_breakdown: ScoreBreakdown,
    pub domain: Domain,
    pub keyword_cloud: Vec<CloudTerm>,
    pub generated_at: DateTime<Utc>,
}

/// Request-independent handles the pipeline needs. Cheap to clone.
#[derive(Clone)]
pub struct MatchPipeline {
    extractor: KeywordExtractor,
    generator: Arc<dyn TextGenerator>,
    collaborator_timeout: Duration,
}

impl MatchPipeline {
    pub fn new(
        extractor: KeywordExtractor,
        generator: Arc<dyn TextGenerator>,
        collaborator_timeout: Duration,
    ) -> Self {
        Self {
            extractor,
            generator,
            collaborator_timeout,
        }
    }

    pub async fn run(&self, resume_text: &str, job_description: &str) -> MatchReport {
        let request_id = Uuid::new_v4();
        self.run_request(request_id, resume_text, job_description)
            .instrument(info_span!("match_request", %request_id))
            .await
    }

    async fn run_request(
        &self,
        request_id: Uuid,
        resume_text: &str,
        job_description: &str,
    ) -> MatchReport {
        let generator = self.generator.as_ref();
        let timeout = self.collaborator_timeout;

        // Steps 1–3: local, deterministic
        let resume_keywords = self.extractor.extract(resume_text);
        let job_keywords = self.extractor.extract(job_description);
        let MatchResult { matched, missing } = match_keywords(&resume_keywords, &job_keywords);
        let score_breakdown = ScoreBreakdown::compute(resume_text, &matched, &job_keywords);
        let score = score_breakdown.total();
        info!(
            resume_keywords = resume_keywords.len(),
            job_keywords = job_keywords.len(),
            matched = matched.len(),
            score,
            "Keyword match scored"
        );

        // Step 4: independent collaborator calls
        let (domain, details) = tokio::join!(
            classify_domain(generator, job_description, timeout),
            extract_details(generator, resume_text, timeout),
        );
        let degraded = usize::from(domain.is_fallback()) + usize::from(details.is_fallback());
        let domain = domain.into_value("domain_classifier");
        let details = details.into_value("detail_extractor");
        info!(%domain, has_name = details.name.is_some(), degraded, "Enrichment complete");

        // Step 5: narrative
        let assessment = generate_assessment(
            generator,
            &NarrativeRequest {
                missing_keywords: &missing,
                job_description,
                domain,
                candidate_name: details.name.as_deref(),
            },
            timeout,
        )
        .await
        .into_value("narrative_generator");

        let keyword_cloud = build_keyword_cloud(&matched, &missing);

        MatchReport {
            request_id,
            matched_keywords: matched,
            missing_keywords: missing,
            details,
            assessment,
            score,
            score_breakdown,
            domain,
            keyword_cloud,
            generated_at: Utc::now(),
        }
    }
}

/// Matched terms first, then missing terms, each with its display weight.
fn build_keyword_cloud(matched: &KeywordSet, missing: &KeywordSet) -> Vec<CloudTerm> {
    let weighted = |terms: &KeywordSet, weight: u32| {
        terms
            .iter()
            .map(move |term| CloudTerm {
                term: term.clone(),
                weight,
            })
            .collect::<Vec<_>>()
    };

    let mut cloud = weighted(matched, CLOUD_MATCHED_WEIGHT);
    cloud.extend(weighted(missing, CLOUD_MISSING_WEIGHT));
    cloud
}
