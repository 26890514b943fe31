use std::collections::HashMap;

use regex::{Captures, Regex};

/// Regex pattern for message template variables
/// Format: `{{variable_name}}`
const VARIABLE_PATTERN: &str = r"\{\{([A-Za-z0-9_]+)\}\}";

/// Substitute `{{variable}}` placeholders with entries from the variable bag.
///
/// The replacement is a single literal pass: values are inserted verbatim and
/// never re-scanned for further placeholders. Placeholders naming a variable
/// that was never captured are left untouched, so an authoring mistake stays
/// visible in the delivered message instead of silently disappearing.
pub fn render(
    template: &str,
    variables: &HashMap<String, String>,
) -> String {
    let re = Regex::new(VARIABLE_PATTERN).unwrap();
    re.replace_all(template, |caps: &Captures| match variables.get(&caps[1]) {
        Some(value) => value.clone(),
        None => caps[0].to_string(),
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variables(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_render_no_placeholders() {
        assert_eq!(render("hello world", &variables(&[])), "hello world");
    }

    #[test]
    fn test_render_known_placeholder() {
        assert_eq!(render("Hi {{name}}!", &variables(&[("name", "Alice")])), "Hi Alice!");
    }

    #[test]
    fn test_render_repeated_placeholder() {
        assert_eq!(
            render("{{name}}, yes, {{name}}", &variables(&[("name", "Alice")])),
            "Alice, yes, Alice"
        );
    }

    #[test]
    fn test_render_unknown_placeholder_left_verbatim() {
        assert_eq!(
            render("Hi {{name}}, your order is {{order_id}}", &variables(&[("name", "Alice")])),
            "Hi Alice, your order is {{order_id}}"
        );
    }

    #[test]
    fn test_render_is_not_recursive() {
        // A value containing placeholder syntax is inserted literally.
        assert_eq!(
            render("{{a}}", &variables(&[("a", "{{b}}"), ("b", "deep")])),
            "{{b}}"
        );
    }

    #[test]
    fn test_render_empty_value() {
        assert_eq!(render("[{{name}}]", &variables(&[("name", "")])), "[]");
    }
}
