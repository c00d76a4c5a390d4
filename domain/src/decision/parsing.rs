//! JSON extraction from free-form oracle replies.
//!
//! Models wrap their JSON in prose or markdown fences more often than not.
//! This is pure text handling; validation happens in [`super::kinds`].

use serde_json::Value;

/// Extract the first JSON object from `response`.
///
/// Tries, in order: the whole response, the contents of a fenced code block,
/// and the span from the first `{` to the last `}`.
pub fn extract_json_object(response: &str) -> Option<Value> {
    let trimmed = response.trim();
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    if let Some(block) = fenced_block(trimmed)
        && let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(block)
    {
        return Some(value);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&trimmed[start..=end]) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_open = &text[open + 3..];
    // Skip the language tag line (```json)
    let body_start = after_open.find('\n')? + 1;
    let body = &after_open[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let value = extract_json_object(r#"{"vote": "Cao Cao", "suspicion_level": 7}"#).unwrap();
        assert_eq!(value["vote"], "Cao Cao");
    }

    #[test]
    fn test_fenced_json() {
        let response = r#"
My choice:
```json
{"target": "Lu Bu", "check_reason": "too quiet", "priority_level": 8}
```
"#;
        let value = extract_json_object(response).unwrap();
        assert_eq!(value["target"], "Lu Bu");
    }

    #[test]
    fn test_json_in_prose() {
        let response = r#"I think {"shoot": false} is right."#;
        let value = extract_json_object(response).unwrap();
        assert_eq!(value["shoot"], false);
    }

    #[test]
    fn test_no_json() {
        assert!(extract_json_object("I refuse to answer.").is_none());
        assert!(extract_json_object("} backwards {").is_none());
        assert!(extract_json_object("[1, 2, 3]").is_none());
    }
}
