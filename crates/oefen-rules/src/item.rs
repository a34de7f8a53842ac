use oefen_core::InteractionKind;
use serde_json::{Map, Value};

/// Keys every item must carry.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "id",
    "schemaVersion",
    "domain",
    "grade",
    "level",
    "topic",
    "interaction",
    "prompt",
    "solution",
];

/// Grades covered by the corpus.
pub const GRADE_RANGE: std::ops::RangeInclusive<u8> = 3..=8;

/// Read-only accessors over one item object.
#[derive(Debug, Clone, Copy)]
pub struct ItemView<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> ItemView<'a> {
    /// Wraps an item; `None` when the item is not a JSON object.
    pub fn new(item: &'a Value) -> Option<Self> {
        item.as_object().map(|map| Self { map })
    }

    /// Raw field, treating `null` as absent.
    pub fn field(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|value| !value.is_null())
    }

    /// String field.
    pub fn str_field(&self, name: &str) -> Option<&'a str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Identifier rendered as text (numbers are accepted).
    pub fn id(&self) -> Option<String> {
        match self.field("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Grade as an integer, accepting numeric strings.
    pub fn grade(&self) -> Option<u8> {
        match self.field("grade")? {
            Value::Number(number) => number.as_u64().and_then(|raw| u8::try_from(raw).ok()),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Raw `interaction.type` tag.
    pub fn interaction_tag(&self) -> Option<&'a str> {
        self.field("interaction")?.get("type")?.as_str()
    }

    /// Parsed interaction kind.
    pub fn interaction_kind(&self) -> Option<InteractionKind> {
        self.interaction_tag().and_then(InteractionKind::from_tag)
    }

    /// `metadata` object when present.
    pub fn metadata(&self) -> Option<&'a Map<String, Value>> {
        self.field("metadata")?.as_object()
    }

    /// MCQ options: top-level `options`, falling back to `interaction.options`.
    pub fn options(&self) -> Option<&'a Value> {
        self.field("options").or_else(|| {
            self.field("interaction")?
                .get("options")
                .filter(|value| !value.is_null())
        })
    }

    /// `solution` record.
    pub fn solution(&self) -> Option<&'a Value> {
        self.field("solution")
    }
}

/// Text of an option given as a string or as an object with `text`.
pub fn option_text(option: &Value) -> Option<&str> {
    match option {
        Value::String(text) => Some(text),
        Value::Object(map) => map.get("text").and_then(Value::as_str),
        _ => None,
    }
}

/// Parses a decimal number written as a JSON number or a numeric string.
///
/// Strings may use a decimal comma. Non-finite values are rejected.
pub fn parse_decimal(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|parsed| parsed.is_finite()),
        _ => None,
    }
}
