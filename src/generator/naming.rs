//! Name derivation and escaping shared by the emitters.

use crate::diagram::ComponentNode;

/// Lower-cases `name` and replaces each run of whitespace with a single hyphen.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// The slug a node's generated names are derived from.
///
/// Falls back to the node's label, then to `fallback` when both slug to nothing.
pub fn node_slug(node: &ComponentNode, fallback: &str) -> String {
    let from_name = slugify(&node.name);
    if !from_name.is_empty() {
        return from_name;
    }
    node.label
        .as_deref()
        .map(slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Terraform resource identifier `{type}_{index}`: only letters, digits and underscores,
/// never starting with a digit.
pub fn terraform_identifier(type_name: &str, index: usize) -> String {
    let mut base: String = type_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if base.is_empty() {
        base.push_str("component");
    } else if base.starts_with(|c: char| c.is_ascii_digit()) {
        base.insert(0, '_');
    }
    format!("{}_{}", base, index)
}

/// Kubernetes object name: lower-case alphanumerics and single hyphens, at most 63 chars.
pub fn dns_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.truncate(63);
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "component".to_string()
    } else {
        trimmed.to_string()
    }
}

/// A double-quoted HCL string literal.
pub fn hcl_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Template sequences would otherwise be interpolated.
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Text safe to place after `# ` on a single line.
pub fn comment_text(value: &str) -> String {
    value
        .chars()
        .map(|c| if is_line_break(c) || c.is_control() { ' ' } else { c })
        .collect()
}

/// Characters some YAML and HCL readers treat as the end of a line.
fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// A YAML scalar: plain when unambiguous, JSON-quoted otherwise.
pub fn yaml_scalar(value: &str) -> String {
    if is_plain_yaml(value) {
        value.to_string()
    } else {
        let quoted = serde_json::Value::String(value.to_string()).to_string();
        if quoted.contains(is_line_break) {
            quoted
                .replace('\u{85}', "\\u0085")
                .replace('\u{2028}', "\\u2028")
                .replace('\u{2029}', "\\u2029")
        } else {
            quoted
        }
    }
}

fn is_plain_yaml(value: &str) -> bool {
    if value.is_empty() || value.trim() != value {
        return false;
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.' | '/'))
    {
        return false;
    }
    // Leading digits and signs cover ints, floats, 0x/0o/0b, sexagesimal and dates.
    if value.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.')) {
        return false;
    }
    let lowered = value.to_ascii_lowercase();
    let reserved = [
        "true", "false", "yes", "no", "on", "off", "y", "n", "null", "~",
    ];
    if reserved.contains(&lowered.as_str()) {
        return false;
    }
    value.parse::<f64>().is_err()
}
