use regex::Regex;
use std::sync::LazyLock;

use super::{ImportShape, NO_SPECIFIC_ITEMS};

static ALIAS_SEPARATOR: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+as\s+").ok());

pub(super) fn describe(shape: &ImportShape) -> String {
    match shape {
        ImportShape::DefaultAndNamed { default, named } => format!(
            "Default import: {}, Named imports: {}",
            default.trim(),
            named_list(named).join(", ")
        ),
        ImportShape::Named(named) => format!("Named imports: {}", named_list(named).join(", ")),
        ImportShape::Default(default) => format!("Default import: {}", default),
        ImportShape::Namespace(namespace) => format!("Namespace import: {}", namespace),
        ImportShape::Multiple(multiple) => format!("Multiple imports: {}", multiple),
        ImportShape::Bare => NO_SPECIFIC_ITEMS.to_string(),
    }
}

/// `{ a, b  as  c, }` -> `["a", "b as c"]`
fn named_list(clause: &str) -> Vec<String> {
    clause
        .replace(['{', '}'], "")
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(binding)
        .collect()
}

fn binding(item: &str) -> String {
    let Some(separator) = ALIAS_SEPARATOR.as_ref() else {
        return item.to_string();
    };
    let mut parts = separator.split(item);
    match (parts.next(), parts.next()) {
        (Some(original), Some(alias)) => format!("{} as {}", original, alias),
        _ => item.to_string(),
    }
}
