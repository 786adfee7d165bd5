#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let (seed_bytes, rest) = data.split_at(8);
    let mut seed = [0u8; 8];
    seed.copy_from_slice(seed_bytes);
    if let Ok(input) = std::str::from_utf8(rest) {
        let dictionary = vec!["alpha".to_owned(), "$RNUM".to_owned()];
        let rendered =
            esperf::fuzzing::render_template_input(input, u64::from_le_bytes(seed), &dictionary);
        if !input.contains('$') {
            debug_assert_eq!(rendered, input);
        }
    }
});
