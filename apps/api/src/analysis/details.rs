//! Detail extraction: candidate name and skills from the model, phone and
//! email from local pattern matching.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::outcome::{with_timeout, Outcome};
use crate::analysis::patterns::{find_email, find_phone};
use crate::analysis::prompts::{DETAILS_PROMPT_TEMPLATE, DETAILS_RESUME_CHARS, DETAILS_SYSTEM};
use crate::llm_client::prompts::{char_prefix, JSON_ONLY_SYSTEM};
use crate::llm_client::{generate_json, TextGenerator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResumeDetails {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Lower-cased, deduplicated.
    pub skills: BTreeSet<String>,
}

/// Payload the model is asked to return.
#[derive(Debug, Default, Deserialize)]
struct ExtractedIdentity {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    skills: Vec<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Identity {
    name: Option<String>,
    skills: BTreeSet<String>,
}

impl From<ExtractedIdentity> for Identity {
    fn from(raw: ExtractedIdentity) -> Self {
        let name = raw
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let skills = raw
            .skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Identity { name, skills }
    }
}

/// Extracts contact details and skills from resume text. Never fails: a
/// collaborator failure leaves `name` empty and `skills` empty.
pub async fn extract_details(
    generator: &dyn TextGenerator,
    resume_text: &str,
    timeout: Duration,
) -> Outcome<ResumeDetails> {
    let identity = extract_identity(generator, resume_text, timeout).await;
    let phone = find_phone(resume_text);
    let email = find_email(resume_text);

    let build = |identity: Identity| ResumeDetails {
        name: identity.name,
        phone: phone.clone(),
        email: email.clone(),
        skills: identity.skills,
    };

    match identity {
        Outcome::Produced(identity) => Outcome::Produced(build(identity)),
        Outcome::Fallback { value, reason } => Outcome::fallback(build(value), reason),
    }
}

async fn extract_identity(
    generator: &dyn TextGenerator,
    resume_text: &str,
    timeout: Duration,
) -> Outcome<Identity> {
    let prompt = DETAILS_PROMPT_TEMPLATE.replace(
        "{resume_text}",
        char_prefix(resume_text, DETAILS_RESUME_CHARS),
    );
    let system = format!("{DETAILS_SYSTEM} {JSON_ONLY_SYSTEM}");

    let call = generate_json::<ExtractedIdentity>(generator, &prompt, &system);
    match with_timeout(timeout, call).await {
        Ok(raw) => Outcome::Produced(raw.into()),
        Err(e) => Outcome::fallback(Identity::default(), format!("detail extraction failed: {e}")),
    }
}
