#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz snapshot parsing and validation.
///
/// Anything that parses must also build an element tree without panicking,
/// including cyclic or dangling type hierarchies.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(snapshot) = api_baseline::Snapshot::from_json(s) {
            let policy = api_baseline::PolicyConfig::default();
            let _ = snapshot.to_element(&policy);
            let _ = snapshot.metadata();
        }
    }
});
