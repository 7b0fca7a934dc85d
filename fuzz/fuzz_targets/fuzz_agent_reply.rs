#![no_main]

//! Agent reply parser fuzzer.
//!
//! Agent answers are untrusted text. Parsing must never panic, and anything
//! it accepts must survive a round trip through the canonical form.

use libfuzzer_sys::fuzz_target;
use nim_arena::agent::AgentReply;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(reply) = AgentReply::parse(raw) {
        let canonical = serde_json::to_string(&reply).unwrap();
        let again = AgentReply::parse(&canonical).unwrap();
        assert_eq!(again, reply);
    }
});
