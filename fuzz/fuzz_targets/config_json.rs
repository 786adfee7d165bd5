#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let parsed = esperf::fuzzing::parse_config_json(input);
        let raw: Result<serde_json::Value, _> = serde_json::from_str(input);
        if parsed.is_ok() {
            debug_assert!(raw.is_ok());
        }
    }
});
