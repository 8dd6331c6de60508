#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Reference parsing should never panic; a parsed reference must re-parse from its display
        if let Ok(reference) = simspec::parse_component_reference(text, "") {
            let again = simspec::parse_component_reference(&reference.to_string(), "");
            assert!(again.is_ok(), "display of {:?} does not parse", reference);
        }
    }
});
