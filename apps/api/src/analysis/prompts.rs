// All LLM prompt constants for the analysis module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Characters of job description sent for domain classification.
pub const CLASSIFY_JD_CHARS: usize = 1000;
/// Characters of resume sent for name/skill extraction.
pub const DETAILS_RESUME_CHARS: usize = 2000;
/// Characters of job description sent for narrative generation.
pub const NARRATIVE_JD_CHARS: usize = 1000;
/// Maximum number of missing keywords listed in the narrative prompt.
pub const NARRATIVE_MAX_KEYWORDS: usize = 30;

/// Placeholder used when the candidate name could not be extracted.
pub const CANDIDATE_PLACEHOLDER: &str = "the candidate";

/// System prompt for domain classification, single-word output.
pub const DOMAIN_SYSTEM: &str = "You are a job market analyst. \
    Classify job descriptions into exactly one industry domain. \
    Respond with a single lower-case word and nothing else.";

/// Domain classification prompt. Replace `{jd_text}` before sending.
pub const DOMAIN_PROMPT_TEMPLATE: &str = "Classify the industry domain of this job description.

Answer with exactly one of: tech, finance, healthcare, general.
Use \"general\" when no other option clearly applies.

Job description:
{jd_text}";

/// System prompt for resume detail extraction. Sent with `JSON_ONLY_SYSTEM` appended.
pub const DETAILS_SYSTEM: &str = "You are a meticulous resume parser.";

/// Detail extraction prompt. Replace `{resume_text}` before sending.
pub const DETAILS_PROMPT_TEMPLATE: &str = r#"Extract the candidate's full name and skills from the resume below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "Jane Doe",
  "skills": ["python", "sql"]
}

Rules:
- "name" is the person's name as written at the top of the resume, or null if none is present.
- NEVER return a technology, job title, section heading, company, or other domain term as the name
  (for example "Machine Learning", "Data Engineer", "Curriculum Vitae" are NOT names).
- "skills" lists concrete skills, tools, and technologies. Use an empty list if none are present.

Resume:
{resume_text}"#;

/// System prompt for the qualitative assessment narrative.
pub const NARRATIVE_SYSTEM: &str = "You are an experienced career coach and technical recruiter. \
    You give specific, candid, actionable resume feedback.";

/// Narrative prompt. Replace `{candidate}`, `{domain}`, `{missing_keywords}`, `{jd_text}`.
pub const NARRATIVE_PROMPT_TEMPLATE: &str = "Assess how well {candidate}'s resume fits a job in the {domain} domain.

Keywords from the job description that the resume does not mention:
{missing_keywords}

Job description (excerpt):
{jd_text}

Write exactly five sections, each starting with a heading line in this literal form:
### Summary
### Strengths
### Weaknesses
### Suggestions
### SWOT

Under Summary write two or three sentences. Under Strengths, Weaknesses and Suggestions write one
bullet per line. Under SWOT write exactly these four lines, each with its label in bold:
**Strengths:** ...
**Weaknesses:** ...
**Opportunities:** ...
**Threats:** ...";
