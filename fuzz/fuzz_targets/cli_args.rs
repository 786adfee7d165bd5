#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut args = Vec::new();
        args.push("esperf".to_owned());
        for token in input.split_whitespace().take(64) {
            args.push(token.to_owned());
        }
        if let Ok(parsed) = esperf::fuzzing::parse_args_input(&args) {
            debug_assert!(parsed.workers.get() >= 1);
            debug_assert!(parsed.iterations.get() >= 1);
            debug_assert!(!parsed.interval.is_zero());
            debug_assert!(!(parsed.data.is_some() && parsed.data_file.is_some()));
        }
    }
});
