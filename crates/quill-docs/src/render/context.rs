//! Render data shared by both renderers.

use serde::Serialize;
use serde_json::{Map, Value};

use super::RenderOptions;
use crate::jsdoc;

/// Text safe to place on a comment line: no line breaks, no `*/`.
pub(crate) fn comment_text(text: &str) -> String {
    let text = if text.contains('\n') {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        text.to_string()
    };
    text.replace("*/", "*\\/")
}

/// Summary of an extracted raw comment, ready for a comment line.
pub(crate) fn description(raw: Option<&str>) -> Option<String> {
    raw.and_then(jsdoc::summary).map(|text| comment_text(&text))
}

/// Template data for one record: its fields, cleaned, plus the option flags.
pub(crate) fn record_context<T: Serialize>(record: &T, options: &RenderOptions) -> Value {
    let mut value = serde_json::to_value(record).unwrap_or_default();
    let Value::Object(map) = &mut value else {
        return value;
    };

    clean_description(map);
    if let Some(Value::Array(params)) = map.get_mut("params") {
        for param in params.iter_mut() {
            if let Value::Object(param) = param {
                clean_description(param);
                if !options.include_descriptions {
                    param.remove("description");
                }
            }
        }
    }
    sanitize_strings(map);

    let has_description = map.contains_key("description");
    map.insert("includeTypes".into(), options.include_types.into());
    map.insert("includeDescriptions".into(), options.include_descriptions.into());
    map.insert("includeExamples".into(), options.include_examples.into());
    map.insert("includeParams".into(), options.include_params.into());
    map.insert("includeReturns".into(), options.include_returns.into());
    map.insert(
        "showDescription".into(),
        (options.include_descriptions && has_description).into(),
    );
    value
}

fn clean_description(map: &mut Map<String, Value>) {
    let cleaned = match map.get("description") {
        Some(Value::String(raw)) => description(Some(raw.as_str())),
        _ => None,
    };
    match cleaned {
        Some(text) => {
            map.insert("description".into(), Value::String(text));
        }
        None => {
            map.remove("description");
        }
    }
}

fn sanitize_strings(map: &mut Map<String, Value>) {
    for value in map.values_mut() {
        sanitize_value(value);
    }
}

fn sanitize_value(value: &mut Value) {
    match value {
        Value::String(text) => *text = comment_text(text),
        Value::Array(items) => items.iter_mut().for_each(sanitize_value),
        Value::Object(map) => sanitize_strings(map),
        _ => {}
    }
}
