use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::{ImportKind, ImportShape, RawImport, SpecifierExtractor};

/// Identifiers are ASCII word characters only.
///
/// Capture groups:
/// 1/2 default + named, 3 named, 4 default, 5 namespace, 6 multiple,
/// 7 `from` specifier, 8 `require` specifier.
static IMPORT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?:import\s+(?:((?-u:\w)+)\s*,\s*(\{[^}]*\})|(\{[^}]*\})|((?-u:\w)+)|(\*\s+as\s+(?-u:\w)+)|((?-u:\w)+\s*,\s*(?-u:\w)+))?"#,
        r#"\s+from\s+['"`]([^'"`]+)['"`]"#,
        r#"|require\s*\(\s*['"`]([^'"`]+)['"`]\))"#,
    ))
    .ok()
});

/// Pattern-based extractor for `import ... from` and `require(...)`.
///
/// Matches in comments and string literals are reported too; side-effect
/// imports (`import './x'`), dynamic `import()` and re-exports are not.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

impl RegexExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl SpecifierExtractor for RegexExtractor {
    fn extract(&self, source: &str) -> Vec<RawImport> {
        let Some(pattern) = IMPORT_PATTERN.as_ref() else {
            return Vec::new();
        };
        pattern
            .captures_iter(source)
            .filter_map(|caps| raw_import(&caps))
            .collect()
    }
}

fn raw_import(caps: &Captures<'_>) -> Option<RawImport> {
    let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
    let offset = caps.get(0)?.start();

    let (specifier, kind) = match (group(7), group(8)) {
        (Some(spec), _) => (spec, ImportKind::From),
        (None, Some(spec)) => (spec, ImportKind::Require),
        (None, None) => return None,
    };

    let shape = if let (Some(default), Some(named)) = (group(1), group(2)) {
        ImportShape::DefaultAndNamed { default, named }
    } else if let Some(named) = group(3) {
        ImportShape::Named(named)
    } else if let Some(default) = group(4) {
        ImportShape::Default(default)
    } else if let Some(namespace) = group(5) {
        ImportShape::Namespace(namespace)
    } else if let Some(multiple) = group(6) {
        ImportShape::Multiple(multiple)
    } else {
        ImportShape::Bare
    };

    Some(RawImport {
        specifier,
        shape,
        kind,
        offset,
    })
}
