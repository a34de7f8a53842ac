mod common;

use oefen_core::PackCoordinate;
use oefen_rules::check_item;
use proptest::prelude::*;
use serde_json::json;

use common::{coordinate, fixture_canons, numeric_item, FORMS};

const TASKFORM_CODES: [&str; 4] = [
    "TASKFORM_DISALLOWED",
    "TASKFORM_UNRECOGNIZED",
    "TASKFORM_NOT_ALLOWED",
    "TASKFORM_UNTAGGED",
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn no_task_form_error_iff_allowed(level_idx in 0usize..4, form_idx in 0usize..FORMS.len()) {
        let (_dir, canons) = fixture_canons();
        let level = ["n1", "n2", "n3", "n4"][level_idx];
        let form = FORMS[form_idx];
        let mut item = numeric_item("q-1");
        item["level"] = json!(level);
        item["metadata"] = json!({ "taskForm": form });
        let meta = PackCoordinate { level: level.to_string(), ..coordinate() };

        let issues = check_item(&item, &meta, &canons);
        let has_taskform_error = issues
            .iter()
            .any(|issue| issue.is_error() && TASKFORM_CODES.contains(&issue.code.as_str()));
        prop_assert_eq!(!has_taskform_error, canons.task_forms.is_allowed(level, form));
    }
}
