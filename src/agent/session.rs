use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::export::render_transcript;
use super::traits::{PromptBuilder, SessionPhase, SessionStats, TurnOutcome};
use crate::guard::{rejection_message, GuardSignal, TopicGuard};
use crate::memory::{ConversationMemory, Message, Role};
use crate::personalization::{
    courtesy_response, greeting_response, introduction_response, is_simple_greeting,
    NameExtractor,
};
use crate::providers::{sanitize_api_error, ChatRequest, Provider, ProviderError};

const PREVIEW_CHARS: usize = 50;

/// Per-session state owned by the controller. Cleared wholesale on reset.
#[derive(Debug, Clone)]
pub struct SessionState {
    user_name: Option<String>,
    question_count: u32,
    message_count: u32,
    memory: ConversationMemory,
    transcript: Vec<Message>,
    started_at: DateTime<Utc>,
}

impl SessionState {
    /// Fresh state whose display transcript opens with `welcome` (if any).
    /// The welcome message never enters the memory window.
    pub fn new(memory_capacity: usize, welcome: Option<&str>) -> Self {
        Self {
            user_name: None,
            question_count: 0,
            message_count: 0,
            memory: ConversationMemory::new(memory_capacity),
            transcript: welcome.map(Message::assistant).into_iter().collect(),
            started_at: Utc::now(),
        }
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    pub fn message_count(&self) -> u32 {
        self.message_count
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Everything shown to the user this session, welcome message included.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Record a turn answered without the model: both sides go to memory
    /// and the transcript, and only the message counter moves.
    pub(super) fn record_local_turn(&mut self, user_message: &str, reply: &str) {
        self.memory.append(Message::user(user_message));
        self.memory.append(Message::assistant(reply));
        self.transcript.push(Message::user(user_message));
        self.transcript.push(Message::assistant(reply));
        self.message_count += 1;
    }
}

/// Model parameters and chat behaviour for a controller.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    pub memory_capacity: usize,
    /// Answer social-only turns locally instead of calling the model.
    pub local_greetings: bool,
    /// Welcome message that opens every session transcript.
    pub greeting_message: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".into(),
            temperature: 0.7,
            max_tokens: Some(1024),
            memory_capacity: crate::memory::DEFAULT_CAPACITY,
            local_greetings: true,
            greeting_message: None,
        }
    }
}

/// Orchestrates one chat session: guard, name extraction, memory, prompt
/// assembly and the model call.
///
/// Turns are handled one at a time through `&mut self`; there is no shared
/// state between controllers.
pub struct SessionController {
    provider: Box<dyn Provider>,
    guard: Box<dyn TopicGuard>,
    extractor: NameExtractor,
    prompt_builder: Box<dyn PromptBuilder>,
    settings: SessionSettings,
    state: SessionState,
    phase: SessionPhase,
}

impl SessionController {
    pub fn new(
        provider: Box<dyn Provider>,
        guard: Box<dyn TopicGuard>,
        extractor: NameExtractor,
        prompt_builder: Box<dyn PromptBuilder>,
        settings: SessionSettings,
    ) -> Self {
        let state = SessionState::new(
            settings.memory_capacity,
            settings.greeting_message.as_deref(),
        );
        Self {
            provider,
            guard,
            extractor,
            prompt_builder,
            settings,
            state,
            phase: SessionPhase::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Handle one user submission and return what to show for it.
    ///
    /// Never fails: guard rejections and model errors both come back as
    /// outcomes the UI can render.
    pub async fn handle_message(&mut self, text: &str) -> TurnOutcome {
        let text = text.trim();

        if let Some(name) = self.extractor.extract(text) {
            info!(name = %name, "User introduced themselves");
            self.state.user_name = Some(name);
        }

        if self.settings.local_greetings && is_simple_greeting(text) {
            let reply = greeting_response(self.state.user_name());
            self.state.record_local_turn(text, &reply);
            debug!(
                message_count = self.state.message_count,
                "Answered simple greeting locally"
            );
            return TurnOutcome::Greeted { reply };
        }

        let decision = self.guard.classify(text);
        if !decision.allowed {
            debug!(
                guard = self.guard.name(),
                reason = decision.reason.as_deref().unwrap_or(""),
                "Guard rejected message"
            );
            let reply = rejection_message().to_string();
            self.state.record_local_turn(text, &reply);
            return TurnOutcome::Rejected {
                reply,
                reason: decision.reason,
            };
        }

        if self.settings.local_greetings && decision.is_social_only() {
            let name = self.state.user_name();
            let reply = match decision.signal.as_ref() {
                Some(GuardSignal::Introduction) => introduction_response(name),
                Some(GuardSignal::Courtesy) => courtesy_response(name),
                _ => greeting_response(name),
            };
            self.state.record_local_turn(text, &reply);
            debug!(
                signal = ?decision.signal,
                message_count = self.state.message_count,
                "Answered social turn locally"
            );
            return TurnOutcome::Greeted { reply };
        }

        debug!(
            signal = ?decision.signal,
            "Guard allowed message"
        );
        self.ask_model(text).await
    }

    async fn ask_model(&mut self, text: &str) -> TurnOutcome {
        let window = self.state.memory.window();
        let prompt = self
            .prompt_builder
            .build(&window, self.state.user_name(), text);

        self.state.memory.append(Message::user(text));
        self.state.transcript.push(Message::user(text));
        self.phase = SessionPhase::AwaitingReply;

        let result = self
            .provider
            .chat(ChatRequest {
                messages: prompt.messages(),
                model: &self.settings.model,
                temperature: self.settings.temperature,
                max_tokens: self.settings.max_tokens,
            })
            .await;
        self.phase = SessionPhase::Idle;

        match result {
            Ok(reply) => {
                self.state.memory.append(Message::assistant(reply.as_str()));
                self.state.transcript.push(Message::assistant(reply.as_str()));
                self.state.question_count += 1;
                self.state.message_count += 1;
                info!(
                    provider = self.provider.name(),
                    model = %self.settings.model,
                    question_count = self.state.question_count,
                    "Model answered"
                );
                TurnOutcome::Answered { reply }
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %sanitize_api_error(&format!("{e:#}")),
                    "Model call failed"
                );
                let error = failure_message(&e);
                self.state.transcript.push(Message::assistant(error.as_str()));
                TurnOutcome::Failed { error }
            }
        }
    }

    /// Start over: counters, name, memory and transcript return to their
    /// initial values. Never calls the model.
    pub fn reset(&mut self) {
        self.state = SessionState::new(
            self.settings.memory_capacity,
            self.settings.greeting_message.as_deref(),
        );
        self.phase = SessionPhase::Idle;
        info!("Session reset");
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            user_name: self.state.user_name.clone(),
            question_count: self.state.question_count,
            message_count: self.state.message_count,
            memory_len: self.state.memory.len(),
            transcript_len: self.state.transcript.len(),
            started_at: self.state.started_at,
        }
    }

    /// One line per transcript entry after the welcome message, each cut to
    /// its first 50 characters.
    pub fn history_preview(&self) -> Vec<String> {
        let skip = usize::from(self.settings.greeting_message.is_some());
        self.state
            .transcript
            .iter()
            .skip(skip)
            .map(|m| {
                let preview: String = m.text().chars().take(PREVIEW_CHARS).collect();
                format!("{}: {preview}...", m.role().label())
            })
            .collect()
    }

    /// Plain-text export of the full transcript. Read-only.
    pub fn export(&self) -> String {
        render_transcript(&self.state, Utc::now())
    }

    /// Default file name for an export of this session.
    pub fn export_file_name(&self) -> String {
        super::export::default_file_name(self.state.user_name())
    }

    /// Whether anything beyond the welcome message has been said.
    pub fn has_conversation(&self) -> bool {
        self.state
            .transcript
            .iter()
            .any(|m| m.role() == Role::User)
    }
}

/// User-facing text for a failed model call.
pub fn failure_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ProviderError>() {
        Some(e) if e.is_auth() => {
            "🔑 **Authentication Error**: Invalid API key. Please check your .env file or config.toml."
                .to_string()
        }
        Some(e) if e.is_rate_limit() => {
            "⏱️ **Rate Limit**: Too many requests. Please wait a moment.".to_string()
        }
        _ => format!("⚠️ **Error**: {}", sanitize_api_error(&error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::RequestBuilder;
    use crate::guard::KeywordTopicGuard;
    use crate::providers::ChatMessage;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::Arc;

    /// Provider double that replays scripted results and records requests.
    #[derive(Clone, Default)]
    struct ScriptedProvider {
        replies: Arc<Mutex<VecDeque<Result<String, ProviderError>>>>,
        calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    }

    impl ScriptedProvider {
        fn with(replies: Vec<Result<String, ProviderError>>) -> Self {
            Self {
                replies: Arc::new(Mutex::new(replies.into())),
                calls: Arc::default(),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().len()
        }

        fn last_call(&self) -> Vec<ChatMessage> {
            self.calls.lock().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        async fn chat(&self, request: ChatRequest<'_>) -> anyhow::Result<String> {
            self.calls.lock().push(request.messages.to_vec());
            match self.replies.lock().pop_front() {
                Some(Ok(reply)) => Ok(reply),
                Some(Err(e)) => Err(e.into()),
                None => Ok("scripted reply".into()),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn controller_with(
        provider: &ScriptedProvider,
        settings: SessionSettings,
    ) -> SessionController {
        SessionController::new(
            Box::new(provider.clone()),
            Box::new(KeywordTopicGuard::new().unwrap()),
            NameExtractor::new().unwrap(),
            Box::new(RequestBuilder::new()),
            settings,
        )
    }

    fn controller(provider: &ScriptedProvider) -> SessionController {
        controller_with(provider, SessionSettings::default())
    }

    fn timeout() -> ProviderError {
        ProviderError::Timeout {
            provider: "scripted".into(),
        }
    }

    // ── Allowed turns ────────────────────────────────────────

    #[tokio::test]
    async fn chess_question_reaches_model_and_counts() {
        let provider = ScriptedProvider::with(vec![Ok("Play 2. Nf3.".into())]);
        let mut ctl = controller(&provider);

        let outcome = ctl
            .handle_message("What is the best response to 1. e4 e5?")
            .await;

        assert_eq!(
            outcome,
            TurnOutcome::Answered {
                reply: "Play 2. Nf3.".into()
            }
        );
        assert_eq!(provider.call_count(), 1);
        assert_eq!(ctl.state().question_count(), 1);
        assert_eq!(ctl.state().message_count(), 1);
        let window = ctl.state().memory().window();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].role(), Role::User);
        assert_eq!(window[1].text(), "Play 2. Nf3.");
        assert_eq!(ctl.phase(), SessionPhase::Idle);
    }

    #[tokio::test]
    async fn prompt_carries_history_and_current_message() {
        let provider = ScriptedProvider::with(vec![Ok("1. e4 c5".into()), Ok("Najdorf".into())]);
        let mut ctl = controller(&provider);

        ctl.handle_message("What is the Sicilian Defense?").await;
        ctl.handle_message("What is the sharpest Sicilian line?").await;

        let sent = provider.last_call();
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0].role, "system");
        assert_eq!(sent[1].content, "What is the Sicilian Defense?");
        assert_eq!(sent[2].content, "1. e4 c5");
        assert_eq!(sent[3], ChatMessage::user("What is the sharpest Sicilian line?"));
    }

    #[tokio::test]
    async fn mixed_intro_and_question_goes_to_model_with_name() {
        let provider = ScriptedProvider::with(vec![Ok("Try the Italian, Alex.".into())]);
        let mut ctl = controller(&provider);

        let outcome = ctl
            .handle_message("Hi, I'm Alex, what's a good opening?")
            .await;

        assert!(matches!(outcome, TurnOutcome::Answered { .. }));
        assert_eq!(ctl.state().user_name(), Some("Alex"));
        let system = &provider.last_call()[0].content;
        assert!(system.contains("The user's name is Alex."));
    }

    // ── Rejected turns ───────────────────────────────────────

    #[tokio::test]
    async fn off_topic_message_is_redirected_without_model_call() {
        let provider = ScriptedProvider::default();
        let mut ctl = controller(&provider);

        let outcome = ctl.handle_message("What's the capital of France?").await;

        match &outcome {
            TurnOutcome::Rejected { reply, reason } => {
                assert_eq!(reply, rejection_message());
                assert!(reason.is_some());
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(provider.call_count(), 0);
        assert_eq!(ctl.state().question_count(), 0);
        assert_eq!(ctl.state().message_count(), 1);
        let window = ctl.state().memory().window();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].text(), "What's the capital of France?");
        assert_eq!(window[1].text(), rejection_message());
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let provider = ScriptedProvider::default();
        let mut ctl = controller(&provider);
        let outcome = ctl.handle_message("   ").await;
        assert!(matches!(outcome, TurnOutcome::Rejected { .. }));
        assert_eq!(provider.call_count(), 0);
    }

    // ── Social turns ─────────────────────────────────────────

    #[tokio::test]
    async fn introduction_sets_name_and_answers_locally() {
        let provider = ScriptedProvider::default();
        let mut ctl = controller(&provider);

        let outcome = ctl.handle_message("My name is Maria.").await;

        match &outcome {
            TurnOutcome::Greeted { reply } => assert!(reply.contains("Maria")),
            other => panic!("expected local greeting, got {other:?}"),
        }
        assert_eq!(ctl.state().user_name(), Some("Maria"));
        assert_eq!(provider.call_count(), 0);
        assert_eq!(ctl.state().message_count(), 1);
        assert_eq!(ctl.state().question_count(), 0);
        assert_eq!(ctl.state().memory().len(), 2);
    }

    #[tokio::test]
    async fn introduction_goes_to_model_when_local_greetings_disabled() {
        let provider = ScriptedProvider::with(vec![Ok("Welcome, Maria!".into())]);
        let mut ctl = controller_with(
            &provider,
            SessionSettings {
                local_greetings: false,
                ..SessionSettings::default()
            },
        );

        let outcome = ctl.handle_message("My name is Maria.").await;

        assert_eq!(
            outcome,
            TurnOutcome::Answered {
                reply: "Welcome, Maria!".into()
            }
        );
        assert_eq!(provider.call_count(), 1);
        assert_eq!(ctl.state().question_count(), 1);
    }

    #[tokio::test]
    async fn simple_greeting_uses_known_name() {
        let provider = ScriptedProvider::default();
        let mut ctl = controller(&provider);

        ctl.handle_message("Call me Viktor").await;
        let outcome = ctl.handle_message("hello!").await;

        assert_eq!(
            outcome.text(),
            "Hello again, Viktor! 👋 How can I help you with chess today?"
        );
        assert_eq!(provider.call_count(), 0);
        assert_eq!(ctl.state().message_count(), 2);
    }

    #[tokio::test]
    async fn thanks_gets_courtesy_reply() {
        let provider = ScriptedProvider::default();
        let mut ctl = controller(&provider);
        let outcome = ctl.handle_message("Thanks a lot").await;
        assert!(outcome.text().starts_with("You're welcome"));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn later_introduction_overwrites_name() {
        let provider = ScriptedProvider::default();
        let mut ctl = controller(&provider);
        ctl.handle_message("My name is Maria.").await;
        ctl.handle_message("Actually, call me Judit.").await;
        assert_eq!(ctl.state().user_name(), Some("Judit"));
    }

    #[tokio::test]
    async fn chess_question_with_i_am_keeps_existing_name() {
        let provider = ScriptedProvider::default();
        let mut ctl = controller(&provider);
        ctl.handle_message("My name is Maria.").await;

        for question in [
            "I'm down a pawn in the endgame, what now?",
            "I am White in this position, best move?",
            "I'm up an exchange, how do I convert?",
        ] {
            let outcome = ctl.handle_message(question).await;
            assert!(matches!(outcome, TurnOutcome::Answered { .. }), "{question}");
            assert_eq!(ctl.state().user_name(), Some("Maria"), "{question}");
        }
        let system = &provider.last_call()[0].content;
        assert!(system.contains("The user's name is Maria."));
    }

    // ── Failures ─────────────────────────────────────────────

    #[tokio::test]
    async fn timeout_keeps_user_message_and_counters() {
        let provider = ScriptedProvider::with(vec![Err(timeout())]);
        let mut ctl = controller(&provider);

        let outcome = ctl.handle_message("Explain the Lucena position").await;

        match &outcome {
            TurnOutcome::Failed { error } => assert!(error.starts_with("⚠️ **Error**")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(ctl.state().question_count(), 0);
        assert_eq!(ctl.state().message_count(), 0);
        let last = ctl.state().memory().last().unwrap();
        assert_eq!(last.role(), Role::User);
        assert_eq!(last.text(), "Explain the Lucena position");
        assert_eq!(
            ctl.state().transcript().last().unwrap().text(),
            outcome.text()
        );
        assert_eq!(ctl.phase(), SessionPhase::Idle);
    }

    #[tokio::test]
    async fn retry_after_failure_includes_failed_question() {
        let provider = ScriptedProvider::with(vec![Err(timeout()), Ok("Build a bridge.".into())]);
        let mut ctl = controller(&provider);

        ctl.handle_message("Explain the Lucena position").await;
        let outcome = ctl.handle_message("Explain the Lucena position").await;

        assert!(matches!(outcome, TurnOutcome::Answered { .. }));
        let sent = provider.last_call();
        assert_eq!(sent[1], ChatMessage::user("Explain the Lucena position"));
        assert_eq!(sent.len(), 3);
        assert_eq!(ctl.state().question_count(), 1);
    }

    #[test]
    fn failure_wording_depends_on_error_kind() {
        let auth = anyhow::Error::new(ProviderError::Auth {
            provider: "groq".into(),
            status: 401,
            message: "Invalid API Key".into(),
        });
        assert!(failure_message(&auth).starts_with("🔑 **Authentication Error**"));

        let missing = anyhow::Error::new(ProviderError::MissingApiKey {
            provider: "groq".into(),
        });
        assert!(failure_message(&missing).contains("Invalid API key"));

        let limited = anyhow::Error::new(ProviderError::RateLimited {
            provider: "groq".into(),
            message: "slow down".into(),
        });
        assert_eq!(
            failure_message(&limited),
            "⏱️ **Rate Limit**: Too many requests. Please wait a moment."
        );

        let other = anyhow::anyhow!("connection reset with key sk-abcdef123456");
        let text = failure_message(&other);
        assert!(text.starts_with("⚠️ **Error**: connection reset"));
        assert!(!text.contains("sk-abcdef123456"));
    }

    // ── Memory window ────────────────────────────────────────

    #[tokio::test]
    async fn memory_window_stays_bounded() {
        let provider = ScriptedProvider::default();
        let mut ctl = controller(&provider);

        for i in 0..8 {
            ctl.handle_message(&format!("Tell me about opening number {i}"))
                .await;
        }

        assert_eq!(ctl.state().memory().len(), 10);
        assert_eq!(ctl.state().question_count(), 8);
        let window = ctl.state().memory().window();
        assert_eq!(window[0].text(), "Tell me about opening number 3");
        // system + at most 10 remembered + current
        assert!(provider.last_call().len() <= 12);
    }

    // ── Reset, stats, history ────────────────────────────────

    #[tokio::test]
    async fn reset_restores_initial_state_and_is_idempotent() {
        let provider = ScriptedProvider::default();
        let mut ctl = controller_with(
            &provider,
            SessionSettings {
                greeting_message: Some("Welcome!".into()),
                ..SessionSettings::default()
            },
        );
        ctl.handle_message("My name is Maria.").await;
        ctl.handle_message("What is a pin?").await;
        let calls_before = provider.call_count();

        ctl.reset();
        let once = ctl.stats();
        ctl.reset();
        let twice = ctl.stats();

        assert_eq!(provider.call_count(), calls_before);
        for stats in [&once, &twice] {
            assert_eq!(stats.user_name, None);
            assert_eq!(stats.question_count, 0);
            assert_eq!(stats.message_count, 0);
            assert_eq!(stats.memory_len, 0);
            assert_eq!(stats.transcript_len, 1);
        }
        assert_eq!(ctl.state().transcript()[0].text(), "Welcome!");
        assert!(!ctl.has_conversation());
    }

    #[tokio::test]
    async fn stats_track_counters() {
        let provider = ScriptedProvider::default();
        let mut ctl = controller(&provider);
        ctl.handle_message("What is a skewer?").await;
        ctl.handle_message("How tall is Everest?").await;

        let stats = ctl.stats();
        assert_eq!(stats.question_count, 1);
        assert_eq!(stats.message_count, 2);
        assert_eq!(stats.memory_len, 4);
        assert_eq!(stats.transcript_len, 4);
    }

    #[tokio::test]
    async fn welcome_message_is_in_transcript_not_memory() {
        let provider = ScriptedProvider::default();
        let ctl = controller_with(
            &provider,
            SessionSettings {
                greeting_message: Some("Welcome!".into()),
                ..SessionSettings::default()
            },
        );
        assert_eq!(ctl.state().transcript().len(), 1);
        assert!(ctl.state().memory().is_empty());
        assert!(ctl.history_preview().is_empty());
    }

    #[tokio::test]
    async fn export_lists_transcript_without_mutating_state() {
        let provider = ScriptedProvider::with(vec![Ok("It attacks two pieces.".into())]);
        let mut ctl = controller_with(
            &provider,
            SessionSettings {
                greeting_message: Some("Welcome!".into()),
                ..SessionSettings::default()
            },
        );
        ctl.handle_message("I'm Alex. What is a fork?").await;
        let before = ctl.stats();

        let text = ctl.export();

        assert!(text.contains("# User: Alex\n"));
        assert!(text.contains("# Total Questions: 1\n"));
        assert!(text.contains("1. Assistant:\nWelcome!\n"));
        assert!(text.contains("2. User:\nI'm Alex. What is a fork?\n"));
        assert!(text.contains("3. Assistant:\nIt attacks two pieces.\n"));
        assert_eq!(ctl.stats(), before);
        assert_eq!(ctl.export_file_name(), "chess_chat_Alex.txt");
        assert!(ctl.has_conversation());
    }

    #[tokio::test]
    async fn history_preview_truncates_entries() {
        let provider = ScriptedProvider::with(vec![Ok("x".repeat(80))]);
        let mut ctl = controller_with(
            &provider,
            SessionSettings {
                greeting_message: Some("Welcome!".into()),
                ..SessionSettings::default()
            },
        );
        ctl.handle_message("What is the Ruy Lopez?").await;

        let preview = ctl.history_preview();
        assert_eq!(preview.len(), 2);
        assert_eq!(preview[0], "User: What is the Ruy Lopez?...");
        assert_eq!(preview[1], format!("Assistant: {}...", "x".repeat(50)));
    }
}
