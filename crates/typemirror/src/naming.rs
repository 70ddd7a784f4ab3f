//! Identifier conversion and reserved-word escaping.

/// Placeholder substituted with the reserved identifier in escape templates.
pub const FIELD_PLACEHOLDER: &str = "{field}";

/// The escape template that produces raw identifiers (`r#type`).
pub const RAW_TEMPLATE: &str = "r#{field}";

/// Keywords that stay invalid even as raw identifiers.
pub const PATH_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Strict and reserved Rust keywords.
const RESERVED: &[&str] = &[
    // control flow
    "break", "continue", "else", "for", "if", "in", "loop", "match", "return", "while",
    // declarations and modifiers
    "as", "const", "enum", "extern", "false", "fn", "impl", "let", "mod", "move", "mut", "pub",
    "ref", "static", "struct", "trait", "true", "type", "unsafe", "use", "where", "async",
    "await", "dyn",
    // paths
    "crate", "self", "super", "Self",
    // reserved for future use
    "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Whether `name` collides with a Rust keyword.
pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

/// Convert a source type name to a Rust type name.
///
/// Source type names are already upper camel case, so this is the identity.
pub fn to_type_name(name: &str) -> String {
    name.to_string()
}

/// Convert a lower camel case property name to snake case.
///
/// Acronym runs split right before the next capitalized word:
/// `getHTTPSConnection` becomes `get_https_connection`.
pub fn to_field_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let camel_boundary = prev.is_ascii_lowercase();
            let acronym_boundary =
                prev.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase());
            if camel_boundary || acronym_boundary {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }

    out
}

/// Convert an enum entry name (any snake case) to a PascalCase variant name.
pub fn to_variant_name(name: &str) -> String {
    name.split('_')
        .map(|segment| {
            let lower = segment.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Substitute `name` into `template` if it is reserved, otherwise return it unchanged.
pub fn escape_if_reserved(name: &str, template: &str) -> String {
    if is_reserved(name) {
        template.replace(FIELD_PLACEHOLDER, name)
    } else {
        name.to_string()
    }
}

/// Whether `template` is the bare raw-identifier escape.
pub fn is_raw_template(template: &str) -> bool {
    template == RAW_TEMPLATE
}

/// The identifier serde sees: raw identifiers lose their `r#` marker.
pub fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}
