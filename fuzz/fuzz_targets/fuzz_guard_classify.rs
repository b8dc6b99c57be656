#![no_main]
use libfuzzer_sys::fuzz_target;

use chessbot::guard::{KeywordTopicGuard, TopicGuard};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let guard = KeywordTopicGuard::new().expect("guard tables compile");
        let decision = guard.classify(s);
        // A decision carries a reason exactly when it rejects.
        assert_eq!(decision.allowed, decision.reason.is_none());
        assert_eq!(decision.allowed, decision.signal.is_some());
    }
});
