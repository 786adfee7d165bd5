#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(auth) = esperf::fuzzing::parse_credentials_input(input) {
            debug_assert!(!auth.username.is_empty());
            debug_assert!(!auth.username.contains(':'));
        }
    }
});
