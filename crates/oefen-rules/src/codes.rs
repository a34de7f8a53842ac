//! Stable issue codes. Machine consumers key on these strings.
#![allow(missing_docs)]

pub const PACK_PARSE_ERROR: &str = "PACK_PARSE_ERROR";
pub const PACK_NOT_ARRAY: &str = "PACK_NOT_ARRAY";
pub const PACK_EMPTY_FILE: &str = "PACK_EMPTY_FILE";
pub const PACK_EMPTY_ARRAY: &str = "PACK_EMPTY_ARRAY";

pub const ITEM_NOT_OBJECT: &str = "ITEM_NOT_OBJECT";
pub const MISSING_FIELD: &str = "MISSING_FIELD";
pub const GRADE_INVALID: &str = "GRADE_INVALID";
pub const COORDINATE_MISMATCH: &str = "COORDINATE_MISMATCH";

pub const TOPIC_UNKNOWN: &str = "TOPIC_UNKNOWN";
pub const LEVEL_NOT_ALLOWED: &str = "LEVEL_NOT_ALLOWED";

pub const TASKFORM_UNTAGGED: &str = "TASKFORM_UNTAGGED";
pub const TASKFORM_DISALLOWED: &str = "TASKFORM_DISALLOWED";
pub const TASKFORM_UNRECOGNIZED: &str = "TASKFORM_UNRECOGNIZED";
pub const TASKFORM_NOT_ALLOWED: &str = "TASKFORM_NOT_ALLOWED";
pub const TASKFORM_UNDEFINED: &str = "TASKFORM_UNDEFINED";

pub const MISCONCEPT_KEYS_NOT_LIST: &str = "MISCONCEPT_KEYS_NOT_LIST";
pub const MISCONCEPT_KEY_INVALID: &str = "MISCONCEPT_KEY_INVALID";
pub const MISCONCEPT_PACK_MISSING: &str = "MISCONCEPT_PACK_MISSING";
pub const MISCONCEPT_UNKNOWN: &str = "MISCONCEPT_UNKNOWN";
pub const FEEDBACK_MISSING: &str = "FEEDBACK_MISSING";

pub const INTERACTION_TYPE_UNKNOWN: &str = "INTERACTION_TYPE_UNKNOWN";
pub const MCQ_OPTIONS_INVALID: &str = "MCQ_OPTIONS_INVALID";
pub const MCQ_INDEX_INVALID: &str = "MCQ_INDEX_INVALID";
pub const MCQ_INDEX_OUT_OF_RANGE: &str = "MCQ_INDEX_OUT_OF_RANGE";
pub const NUMERIC_VALUE_INVALID: &str = "NUMERIC_VALUE_INVALID";
pub const FILL_BLANKS_SOLUTION_EMPTY: &str = "FILL_BLANKS_SOLUTION_EMPTY";

pub const DUPLICATE_ID: &str = "DUPLICATE_ID";
