//! Turn orchestration: prompt assembly, session state and the controller
//! that ties guard, personalisation, memory and the model client together.

pub mod export;
pub mod prompt;
pub mod session;
pub mod traits;

#[allow(unused_imports)]
pub use prompt::{RequestBuilder, SYSTEM_PROMPT};
#[allow(unused_imports)]
pub use session::{failure_message, SessionController, SessionSettings, SessionState};
#[allow(unused_imports)]
pub use traits::{Prompt, PromptBuilder, SessionPhase, SessionStats, TurnOutcome};

use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::Config;
use crate::guard::{create_guard, Vocabulary};
use crate::personalization::NameExtractor;
use crate::providers::{create_provider_with_url, Provider};

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model_name().to_string(),
            temperature: config.default_temperature,
            max_tokens: Some(config.max_tokens),
            memory_capacity: config.memory.capacity,
            local_greetings: config.chat.local_greetings,
            greeting_message: Some(config.chat.greeting_message.clone())
                .filter(|m| !m.trim().is_empty()),
        }
    }
}

/// Factory: build a controller around an already-constructed provider.
pub fn create_controller_with_provider(
    config: &Config,
    provider: Box<dyn Provider>,
) -> Result<SessionController> {
    let guard = create_guard(&config.guard).context("Failed to build topic guard")?;
    let extractor = NameExtractor::with_vocabulary(Vocabulary::with_extra(
        &config.guard.extra_keywords,
    ))
    .context("Failed to build name extractor")?;

    Ok(SessionController::new(
        provider,
        guard,
        extractor,
        Box::new(RequestBuilder::new()),
        SessionSettings::from_config(config),
    ))
}

/// Factory: build a controller from config, creating the configured provider.
pub fn create_controller(config: &Config) -> Result<SessionController> {
    let provider = create_provider_with_url(
        config.provider_name(),
        config.api_key.as_deref(),
        config.api_url.as_deref(),
        Some(Duration::from_secs(config.request_timeout_secs)),
    )?;
    create_controller_with_provider(config, provider)
}
