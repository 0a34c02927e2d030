//! YAML front matter extraction.

use std::collections::BTreeMap;

/// Parsed front matter attributes.
pub type FrontMatter = BTreeMap<String, serde_yaml::Value>;

/// Split a leading `---` YAML block from the markdown body.
///
/// The block must start on the first line and end with a line containing
/// only `---` or `...`. Returns empty attributes and the whole input when
/// there is no block or it is not a YAML mapping.
pub fn split_front_matter(input: &str) -> (FrontMatter, &str) {
    let Some((yaml, body)) = find_block(input) else {
        return (FrontMatter::new(), input);
    };

    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return (FrontMatter::new(), body);
    }

    match serde_yaml::from_str::<FrontMatter>(trimmed) {
        Ok(attributes) => (attributes, body),
        Err(e) => {
            tracing::debug!(error = %e, "Front matter is not valid YAML, rendering it as markdown");
            (FrontMatter::new(), input)
        }
    }
}

/// Locate the YAML text and the body following the closing fence.
fn find_block(input: &str) -> Option<(&str, &str)> {
    let rest = input.strip_prefix('\u{feff}').unwrap_or(input);
    let rest = rest
        .strip_prefix("---\r\n")
        .or_else(|| rest.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let content = line.trim_end_matches(['\r', '\n']);
        if content == "---" || content == "..." {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}
