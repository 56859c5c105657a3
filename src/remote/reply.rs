use indexmap::IndexMap;
use log::warn;
use serde_json::Value;

use crate::insights::CorrelationReport;

pub const NO_SUMMARY: &str = "No summary provided.";

/// Drops a surrounding Markdown code fence if the model added one.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };

    // The fence may carry a language tag on its opening line.
    match inner.split_once('\n') {
        Some((tag, body)) if !tag.trim().contains(char::is_whitespace) => body.trim(),
        _ => inner.trim(),
    }
}

fn raw_text(text: &str) -> CorrelationReport {
    CorrelationReport {
        categories: IndexMap::new(),
        summary: text.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn category_count(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|v| *v >= 0.0).map(|v| v.round() as u64))
}

pub fn parse_reply(text: &str) -> CorrelationReport {
    let value: Value = match serde_json::from_str(strip_code_fence(text)) {
        Ok(value) => value,
        Err(e) => {
            warn!("Remote reply is not JSON, using raw text: {e}");
            return raw_text(text);
        }
    };

    let Value::Object(object) = value else {
        warn!("Remote reply is not a JSON object, using raw text");
        return raw_text(text);
    };

    let categories = object
        .get("categories")
        .and_then(Value::as_object)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|(name, count)| category_count(count).map(|c| (name.clone(), c)))
                .collect()
        })
        .unwrap_or_default();

    let summary = object
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or(NO_SUMMARY)
        .to_string();

    CorrelationReport {
        categories,
        summary,
    }
}
