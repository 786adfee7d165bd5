#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let interval = esperf::fuzzing::parse_duration_input(input);
        let warmup = esperf::fuzzing::parse_warmup_input(input);
        if let Ok(duration) = interval {
            debug_assert!(!duration.is_zero());
            debug_assert!(warmup.is_ok());
        }
    }
});
