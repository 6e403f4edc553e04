use serde::Deserialize;
use serde_json::{
    json,
    Map,
    Value,
};

/// Partial property map sent as the body of a page update.
pub type PropertyPatch = Map<String, Value>;

/// The property representations this crate reads. Anything else fails the
/// tagged deserialization and falls back to the kind's default.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum PropertyValue {
    Title { title: Vec<RichTextSegment> },
    RichText { rich_text: Vec<RichTextSegment> },
    Date { date: Option<DateValue> },
    Select { select: Option<SelectOption> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Number { number: Option<f64> },
    Status { status: Option<SelectOption> },
}

#[derive(Debug, Deserialize)]
struct RichTextSegment {
    #[serde(default)]
    plain_text: String,
}

#[derive(Debug, Deserialize)]
struct DateValue {
    #[serde(default)]
    start: String,
}

#[derive(Debug, Deserialize)]
struct SelectOption {
    #[serde(default)]
    name: String,
}

fn parse(property: Option<&Value>) -> Option<PropertyValue> {
    property.and_then(|value| serde_json::from_value(value.clone()).ok())
}

/// Text content of a property: first segment of title/rich text, start of a
/// date, name of a select, joined names of a multi-select. Anything missing
/// or malformed is an empty string.
pub fn text_value(property: Option<&Value>) -> String {
    match parse(property) {
        Some(PropertyValue::Title { title }) => first_plain_text(title),
        Some(PropertyValue::RichText { rich_text }) => first_plain_text(rich_text),
        Some(PropertyValue::Date { date }) => date.map(|d| d.start).unwrap_or_default(),
        Some(PropertyValue::Select { select }) => select.map(|s| s.name).unwrap_or_default(),
        Some(PropertyValue::MultiSelect { multi_select }) => multi_select
            .into_iter()
            .map(|option| option.name)
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

/// Numeric value of a number property, 0 when absent or a different kind.
pub fn number_value(property: Option<&Value>) -> f64 {
    match parse(property) {
        Some(PropertyValue::Number { number }) => number.unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Display name of a status property, empty when absent or unset.
pub fn status_value(property: Option<&Value>) -> String {
    match parse(property) {
        Some(PropertyValue::Status { status }) => status.map(|s| s.name).unwrap_or_default(),
        _ => String::new(),
    }
}

fn first_plain_text(segments: Vec<RichTextSegment>) -> String {
    segments.into_iter().next().map(|segment| segment.plain_text).unwrap_or_default()
}

// Outbound builders, one per property shape the mutator writes.

pub fn rich_text_payload(text: &str) -> Value {
    json!({ "rich_text": [{ "text": { "content": text } }] })
}

pub fn status_payload(name: &str) -> Value {
    json!({ "status": { "name": name } })
}

pub fn number_payload(value: u32) -> Value {
    json!({ "number": value })
}

pub fn date_payload(start: &str) -> Value {
    json!({ "date": { "start": start } })
}
