// Resume/job matching: tagging, keyword extraction, set matching, scoring,
// the end-to-end pipeline, and its HTTP handlers.

pub mod handlers;
pub mod keywords;
pub mod matcher;
pub mod pipeline;
pub mod scoring;
pub mod tagger;
