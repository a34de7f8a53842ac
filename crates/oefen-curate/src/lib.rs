#![deny(missing_docs)]
#![doc = "Pack curation transforms: keyed answer-position rebalancing and idempotent patch sets."]

/// Strict pack file reading and writing.
pub mod io;
pub mod patch;
pub mod rebalance;

use serde_json::{json, Value};

pub use io::{read_pack_file, write_pack_file};
pub use patch::{
    apply_patches, load_patch_set, patch_file, Edit, Patch, PatchOutcome, PatchReport, PatchSet,
    PatchStatus, Selector,
};
pub use rebalance::{
    rebalance_file, rebalance_items, shuffled_targets, target_positions, RebalanceOptions,
    RebalanceSummary,
};

/// Mutable MCQ options: top-level `options`, else `interaction.options`.
pub(crate) fn options_mut(item: &mut Value) -> Option<&mut Vec<Value>> {
    let map = item.as_object_mut()?;
    if map.get("options").map_or(false, Value::is_array) {
        return map.get_mut("options")?.as_array_mut();
    }
    map.get_mut("interaction")?
        .get_mut("options")?
        .as_array_mut()
}

/// Sets `solution.index`, keeping a top-level `correctIndex` in sync.
pub(crate) fn set_solution_index(item: &mut Value, index: usize) -> bool {
    let Some(map) = item.as_object_mut() else {
        return false;
    };
    let solution = map
        .entry("solution")
        .or_insert_with(|| Value::Object(Default::default()));
    let Some(solution) = solution.as_object_mut() else {
        return false;
    };
    solution.insert("index".to_string(), json!(index));
    if let Some(correct) = map.get_mut("correctIndex") {
        *correct = json!(index);
    }
    true
}
