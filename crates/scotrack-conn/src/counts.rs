//! `_count` bookkeeping shared by the connection implementations.

use std::collections::BTreeMap;

const COUNTED_BRANCHES: [&str; 2] = ["cmi.objectives.", "cmi.interactions."];

/// After a write to `path`, raise the branch's `_count` element so it
/// covers the record index just touched. A real LMS materializes a
/// record (and grows the count) on the first write to any of its fields.
pub(crate) fn note_indexed_write(values: &mut BTreeMap<String, String>, path: &str) {
    for branch in COUNTED_BRANCHES {
        let Some(rest) = path.strip_prefix(branch) else {
            continue;
        };
        let Some((index, _)) = rest.split_once('.') else {
            continue;
        };
        let Ok(index) = index.parse::<u64>() else {
            continue;
        };
        let count_path = format!("{branch}_count");
        let current: u64 = values
            .get(&count_path)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        if index + 1 > current {
            values.insert(count_path, (index + 1).to_string());
        }
    }
}
