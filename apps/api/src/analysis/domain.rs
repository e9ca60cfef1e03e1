//! Domain classification: maps a job description to one of a fixed set of
//! industry domains. Any collaborator failure or unrecognised label yields `General`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::outcome::{with_timeout, Outcome};
use crate::analysis::prompts::{CLASSIFY_JD_CHARS, DOMAIN_PROMPT_TEMPLATE, DOMAIN_SYSTEM};
use crate::llm_client::prompts::char_prefix;
use crate::llm_client::TextGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Tech,
    Finance,
    Healthcare,
    #[default]
    General,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Tech => "tech",
            Domain::Finance => "finance",
            Domain::Healthcare => "healthcare",
            Domain::General => "general",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDomain(pub String);

impl FromStr for Domain {
    type Err = UnknownDomain;

    /// Accepts the raw collaborator label: case-insensitive, surrounding
    /// whitespace and punctuation ignored.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let label = raw
            .trim()
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        match label.as_str() {
            "tech" => Ok(Domain::Tech),
            "finance" => Ok(Domain::Finance),
            "healthcare" => Ok(Domain::Healthcare),
            "general" => Ok(Domain::General),
            _ => Err(UnknownDomain(label)),
        }
    }
}

/// Classifies the job description. Never fails: the fallback is `Domain::General`.
pub async fn classify_domain(
    generator: &dyn TextGenerator,
    job_description: &str,
    timeout: Duration,
) -> Outcome<Domain> {
    let prompt = DOMAIN_PROMPT_TEMPLATE.replace(
        "{jd_text}",
        char_prefix(job_description, CLASSIFY_JD_CHARS),
    );

    match with_timeout(timeout, generator.generate(&prompt, DOMAIN_SYSTEM)).await {
        Ok(raw) => match raw.parse::<Domain>() {
            Ok(domain) => Outcome::Produced(domain),
            Err(UnknownDomain(label)) => Outcome::fallback(
                Domain::General,
                format!("unrecognised domain label '{label}'"),
            ),
        },
        Err(e) => Outcome::fallback(Domain::General, format!("classification failed: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::{Reply, ScriptedGenerator};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_parse_normalizes_case_and_punctuation() {
        assert_eq!("Tech".parse::<Domain>(), Ok(Domain::Tech));
        assert_eq!("  FINANCE.\n".parse::<Domain>(), Ok(Domain::Finance));
        assert_eq!("\"healthcare\"".parse::<Domain>(), Ok(Domain::Healthcare));
    }

    #[test]
    fn test_parse_rejects_non_members() {
        assert!("retail".parse::<Domain>().is_err());
        assert!("tech and finance".parse::<Domain>().is_err());
        assert!("".parse::<Domain>().is_err());
    }

    #[test]
    fn test_domain_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Domain::Healthcare).unwrap(), "\"healthcare\"");
    }

    #[tokio::test]
    async fn test_classify_recognised_label() {
        let generator = ScriptedGenerator::always("Finance");
        let outcome = classify_domain(&generator, "Quantitative analyst role", TIMEOUT).await;
        assert_eq!(outcome, Outcome::Produced(Domain::Finance));
    }

    #[tokio::test]
    async fn test_classify_unknown_label_falls_back_to_general() {
        let generator = ScriptedGenerator::always("aerospace");
        let outcome = classify_domain(&generator, "Rocket engineer", TIMEOUT).await;
        assert!(outcome.is_fallback());
        assert_eq!(*outcome.value(), Domain::General);
    }

    #[tokio::test]
    async fn test_classify_collaborator_error_falls_back_to_general() {
        let generator = ScriptedGenerator::failing();
        let outcome = classify_domain(&generator, "Nurse practitioner", TIMEOUT).await;
        assert!(outcome.is_fallback());
        assert_eq!(*outcome.value(), Domain::General);
    }

    #[tokio::test(start_paused = true)]
    async fn test_classify_timeout_falls_back_to_general() {
        let generator = ScriptedGenerator::new(Reply::Hang);
        let outcome = classify_domain(&generator, "Nurse practitioner", TIMEOUT).await;
        assert_eq!(*outcome.value(), Domain::General);
    }

    #[tokio::test]
    async fn test_classify_sends_bounded_prefix() {
        let generator = ScriptedGenerator::always("tech");
        let long_jd = "x".repeat(5000);
        classify_domain(&generator, &long_jd, TIMEOUT).await;

        let prompt = &generator.prompts()[0];
        assert!(prompt.contains(&"x".repeat(CLASSIFY_JD_CHARS)));
        assert!(!prompt.contains(&"x".repeat(CLASSIFY_JD_CHARS + 1)));
    }
}
