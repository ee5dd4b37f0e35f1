#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz version parsing, both strict and lenient.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(version) = s.parse::<api_baseline::Version>() {
            let _ = version.next_major();
            let _ = version.without_qualifier();
        }
        let _ = api_baseline::Version::parse_lenient(Some(s));
    }
});
