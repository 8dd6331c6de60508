#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Fuzz KEY=VALUE overrides merged onto the built-in base - this should never panic
        if let Ok(tree) = simspec::parse_override(text) {
            if let Ok(base) = simspec::config::builtin_base() {
                let _ = simspec::merge(&base, &tree);
            }
        }
    }
});
