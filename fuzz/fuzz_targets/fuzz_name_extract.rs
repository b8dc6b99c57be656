#![no_main]
use libfuzzer_sys::fuzz_target;

use chessbot::personalization::NameExtractor;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let extractor = NameExtractor::new().expect("extractor patterns compile");
        if let Some(name) = extractor.extract(s) {
            assert!(!name.trim().is_empty());
        }
    }
});
