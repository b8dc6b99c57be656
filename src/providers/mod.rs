//! Provider subsystem for model inference backends.
//!
//! Every supported backend speaks the OpenAI-compatible chat completions
//! API, so the factory only differs in base URL and credential lookup.
//! Backends implement [`Provider`] from [`traits`] and are selected by their
//! canonical string key in [`create_provider_with_url`].

pub mod compatible;
pub mod traits;

#[allow(unused_imports)]
pub use compatible::OpenAiCompatibleProvider;
#[allow(unused_imports)]
pub use traits::{ChatMessage, ChatRequest, Provider, ProviderError};

use std::time::Duration;

const MAX_API_ERROR_CHARS: usize = 200;

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')
}

fn token_end(input: &str, from: usize) -> usize {
    let mut end = from;
    for (i, c) in input[from..].char_indices() {
        if is_secret_char(c) {
            end = from + i + c.len_utf8();
        } else {
            break;
        }
    }
    end
}

/// Scrub known secret-like token prefixes from provider error strings.
///
/// Redacts tokens with prefixes like `sk-`, `gsk_`, `xoxb-`, `ghp_` and
/// `github_pat_`.
pub fn scrub_secret_patterns(input: &str) -> String {
    const PREFIXES: [&str; 8] = [
        "sk-",
        "gsk_",
        "xoxb-",
        "xoxp-",
        "ghp_",
        "gho_",
        "ghu_",
        "github_pat_",
    ];

    let mut scrubbed = input.to_string();

    for prefix in PREFIXES {
        let mut search_from = 0;
        loop {
            let Some(rel) = scrubbed[search_from..].find(prefix) else {
                break;
            };

            let start = search_from + rel;
            let content_start = start + prefix.len();
            let end = token_end(&scrubbed, content_start);

            if end == content_start {
                search_from = content_start;
                continue;
            }

            scrubbed.replace_range(start..end, "[REDACTED]");
            search_from = start + "[REDACTED]".len();
        }
    }

    scrubbed
}

/// Sanitize API error text by scrubbing secrets and truncating length.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed;
    }

    let mut end = MAX_API_ERROR_CHARS;
    while end > 0 && !scrubbed.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &scrubbed[..end])
}

/// Resolve API key for a provider from config and environment variables.
fn resolve_provider_credential(name: &str, credential_override: Option<&str>) -> Option<String> {
    if let Some(raw_override) = credential_override {
        let trimmed_override = raw_override.trim();
        if !trimmed_override.is_empty() {
            return Some(trimmed_override.to_owned());
        }
    }

    let provider_env_candidates: Vec<&str> = match name {
        "groq" => vec!["GROQ_API_KEY"],
        "openai" => vec!["OPENAI_API_KEY"],
        _ => vec![],
    };

    for env_var in provider_env_candidates
        .into_iter()
        .chain(["CHESSBOT_API_KEY", "API_KEY"])
    {
        if let Ok(value) = std::env::var(env_var) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}

/// Factory: create a provider with an optional base URL override and request
/// timeout.
///
/// Names: `groq`, `openai`, or `custom:<URL>` for any OpenAI-compatible
/// endpoint. A missing key is not an error here; the first call reports it.
pub fn create_provider_with_url(
    name: &str,
    api_key: Option<&str>,
    api_url: Option<&str>,
    timeout: Option<Duration>,
) -> anyhow::Result<Box<dyn Provider>> {
    let name = name.trim();
    let canonical = name.to_ascii_lowercase();
    let key = resolve_provider_credential(&canonical, api_key);
    let timeout = timeout.unwrap_or(Duration::from_secs(compatible::DEFAULT_TIMEOUT_SECS));

    let url_override = api_url.map(str::trim).filter(|u| !u.is_empty());

    let (display, base_url) = if let Some(custom) = name.strip_prefix("custom:") {
        let custom = custom.trim();
        if custom.is_empty() {
            anyhow::bail!("custom provider requires a URL, e.g. custom:https://host/v1");
        }
        reqwest::Url::parse(custom)
            .map_err(|e| anyhow::anyhow!("invalid custom provider URL {custom}: {e}"))?;
        ("custom", custom.to_string())
    } else {
        match canonical.as_str() {
            "groq" => ("groq", url_override.unwrap_or(GROQ_BASE_URL).to_string()),
            "openai" => ("openai", url_override.unwrap_or(OPENAI_BASE_URL).to_string()),
            _ => anyhow::bail!(
                "Unknown provider: {name}. Supported: groq, openai, custom:<URL>."
            ),
        }
    };

    Ok(Box::new(OpenAiCompatibleProvider::with_timeout(
        display,
        &base_url,
        key.as_deref(),
        timeout,
    )))
}

/// Information about a supported provider for display purposes.
pub struct ProviderInfo {
    /// Canonical name used in config (e.g. `"groq"`)
    pub name: &'static str,
    /// Human-readable display name
    pub display_name: &'static str,
    /// Default API base URL
    pub base_url: &'static str,
    /// Environment variable checked for the API key
    pub key_env: &'static str,
}

/// Return the list of all known providers for display in `chessbot providers`.
pub fn list_providers() -> Vec<ProviderInfo> {
    vec![
        ProviderInfo {
            name: "groq",
            display_name: "Groq",
            base_url: GROQ_BASE_URL,
            key_env: "GROQ_API_KEY",
        },
        ProviderInfo {
            name: "openai",
            display_name: "OpenAI",
            base_url: OPENAI_BASE_URL,
            key_env: "OPENAI_API_KEY",
        },
    ]
}
