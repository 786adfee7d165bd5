#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(value) = esperf::fuzzing::parse_positive_u64_input(input) {
            debug_assert!(value.get() >= 1);
        }
        if let Ok(value) = esperf::fuzzing::parse_positive_usize_input(input) {
            debug_assert!(value.get() >= 1);
        }
    }
});
