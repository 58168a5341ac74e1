// File: src/template.rs
// Purpose: `{{ path }}` placeholder rendering for error messages

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

// Optional leading backslash escapes the placeholder
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\\)?\{\{\s*([^{}\s]+)\s*\}\}").unwrap()
});

/// Render every `{{ path }}` placeholder in `template` against `data`
///
/// Paths are dotted (`args.0`, `user.name`). Missing values render as an
/// empty string, `\{{ x }}` renders as the literal `{{ x }}`.
pub fn render(template: &str, data: &Value) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| {
            if caps.get(1).is_some() {
                return caps[0][1..].to_string();
            }
            lookup(data, &caps[2]).map(stringify).unwrap_or_default()
        })
        .into_owned()
}

fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |node, key| match node {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_top_level_keys() {
        let data = json!({ "field": "email", "validation": "required" });
        assert_eq!(
            render("{{field}} failed {{ validation }}", &data),
            "email failed required"
        );
    }

    #[test]
    fn test_render_array_index_and_join() {
        let data = json!({ "args": [4, 10] });
        assert_eq!(render("between {{ args.0 }} and {{ args.1 }}", &data), "between 4 and 10");
        assert_eq!(render("one of {{ args }}", &data), "one of 4,10");
    }

    #[test]
    fn test_missing_values_render_empty() {
        let data = json!({ "args": [] });
        assert_eq!(render("[{{ args.3 }}][{{ nope }}]", &data), "[][]");
    }

    #[test]
    fn test_escaped_placeholder() {
        let data = json!({ "field": "email" });
        assert_eq!(render(r"\{{ field }} is {{ field }}", &data), "{{ field }} is email");
    }

    #[test]
    fn test_text_without_placeholders_is_untouched() {
        assert_eq!(render("plain { text }", &json!({})), "plain { text }");
    }
}
