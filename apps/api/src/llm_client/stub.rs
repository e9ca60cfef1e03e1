//! Scripted `TextGenerator` for tests. Replies are chosen by the system prompt
//! of each call, so one stub can stand in for every collaborator in a pipeline run.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{LlmError, TextGenerator};

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail,
    /// Never answers within any sane timeout.
    Hang,
}

impl Reply {
    pub fn text(text: &str) -> Self {
        Reply::Text(text.to_string())
    }
}

pub struct ScriptedGenerator {
    default: Reply,
    routes: Vec<(&'static str, Reply)>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(default: Reply) -> Self {
        Self {
            default,
            routes: Vec::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn always(text: &str) -> Self {
        Self::new(Reply::text(text))
    }

    pub fn failing() -> Self {
        Self::new(Reply::Fail)
    }

    /// Answers calls whose system prompt starts with `system` with `reply`.
    pub fn route(mut self, system: &'static str, reply: Reply) -> Self {
        self.routes.push((system, reply));
        self
    }

    /// Every user prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let reply = self
            .routes
            .iter()
            .find(|(marker, _)| system.starts_with(*marker))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.default.clone());

        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Fail => Err(LlmError::Api {
                status: 503,
                message: "scripted failure".to_string(),
            }),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(LlmError::EmptyContent)
            }
        }
    }
}
