#![no_main]
use libfuzzer_sys::fuzz_target;

use api_baseline::baseline::Baseliner;
use api_baseline::{Diff, PolicyConfig, Snapshot};

/// Fuzz the full comparison of a snapshot against itself and against an
/// empty release of the same component.
///
/// Arbitrary snapshots exercise the policy builder, the merge-join and every
/// reclassification pass of the baseliner.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(newer) = Snapshot::from_json(s) else {
        return;
    };

    let policy = PolicyConfig::default();
    let mut older = newer.clone();
    older.types.clear();
    let newer_tree = newer.to_element(&policy);
    let older_tree = older.to_element(&policy);

    let baseliner = Baseliner::default();
    let (newer_meta, older_meta) = (newer.metadata(), older.metadata());
    for older_tree in [&newer_tree, &older_tree] {
        if let Ok(diff) = Diff::new(&newer_tree, older_tree) {
            let result = baseliner.baseline(&diff, &newer_meta, Some(&older_meta));
            let _ = result.has_mismatch();
        }
    }
});
