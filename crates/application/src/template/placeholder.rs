//! Placeholder substitution for `{{key}}` templates.
//!
//! Keys are taken verbatim between the braces (no trimming) and never span
//! a line break. There is no escape for a literal `{{...}}`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

/// Flat variable mapping used for substitution.
pub type Variables = BTreeMap<String, String>;

#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("placeholder pattern is valid"));

/// Replaces every `{{key}}` with `vars[key]`, or with the empty string when
/// the key is absent.
///
/// # Examples
///
/// ```
/// use bridge_application::template::{Variables, substitute};
///
/// let mut vars = Variables::new();
/// vars.insert("name".to_string(), "World".to_string());
/// assert_eq!(substitute("Hello {{name}}", &vars), "Hello World");
/// assert_eq!(substitute("Hello {{missing}}", &Variables::new()), "Hello ");
/// ```
#[must_use]
pub fn substitute(template: &str, vars: &Variables) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            vars.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// Replaces `{{key}}` only for keys present in `vars`, leaving every other
/// placeholder untouched for a later pass.
#[must_use]
pub fn substitute_known(template: &str, vars: &Variables) -> String {
    if vars.is_empty() {
        return template.to_string();
    }
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            vars.get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Substitutes inside a JSON value by serialising it, substituting the text
/// and parsing the result again.
///
/// # Errors
///
/// Returns the parse error when the substituted text is no longer JSON.
pub fn substitute_value(template: &Value, vars: &Variables) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&substitute(&template.to_string(), vars))
}

/// Like [`substitute_value`], but only for keys present in `vars`.
///
/// # Errors
///
/// Returns the parse error when the substituted text is no longer JSON.
pub fn substitute_value_known(
    template: &Value,
    vars: &Variables,
) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&substitute_known(&template.to_string(), vars))
}

/// Returns whether the template contains any `{{...}}` placeholder.
#[must_use]
pub fn has_placeholders(template: &str) -> bool {
    PLACEHOLDER.is_match(template)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn vars(pairs: &[(&str, &str)]) -> Variables {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_substitute_known_key() {
        assert_eq!(
            substitute("Hello {{name}}", &vars(&[("name", "World")])),
            "Hello World"
        );
    }

    #[test]
    fn test_substitute_missing_key_is_empty() {
        assert_eq!(substitute("Hello {{missing}}", &Variables::new()), "Hello ");
    }

    #[test]
    fn test_substitute_every_occurrence() {
        assert_eq!(
            substitute("{{a}}-{{a}}-{{b}}", &vars(&[("a", "1"), ("b", "2")])),
            "1-1-2"
        );
    }

    #[test]
    fn test_keys_are_not_trimmed() {
        assert_eq!(substitute("{{ name }}", &vars(&[("name", "x")])), "");
    }

    #[test]
    fn test_placeholders_do_not_span_lines() {
        assert_eq!(substitute("{{a\n}}", &Variables::new()), "{{a\n}}");
    }

    #[test]
    fn test_substitute_known_keeps_unknown() {
        assert_eq!(
            substitute_known("{{input}} {{title}}", &vars(&[("input", "q")])),
            "q {{title}}"
        );
    }

    #[test]
    fn test_substitute_value() {
        let template = json!({"q": "{{input}}", "n": 1});
        let value = substitute_value(&template, &vars(&[("input", "rust")])).unwrap();
        assert_eq!(value, json!({"q": "rust", "n": 1}));
    }

    #[test]
    fn test_substitute_value_reports_broken_json() {
        let template = json!({"q": "{{input}}"});
        assert!(substitute_value(&template, &vars(&[("input", "a\"b")])).is_err());
    }

    #[test]
    fn test_has_placeholders() {
        assert!(has_placeholders("x {{y}}"));
        assert!(!has_placeholders("x {y}"));
    }
}
