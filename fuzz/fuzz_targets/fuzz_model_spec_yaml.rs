#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz model specification loading - this should never panic
        let _ = simspec::ModelSpecLoader::new().parse_str(content, "fuzz.yaml");
    }
});
