//! Localized user facing strings.
//!
//! Every string shown by the palette goes through [`Messages::localize`]
//! with a stable key and an English default. A message catalog from the
//! configuration file can override any key.

use std::collections::HashMap;

/// A catalog of message overrides keyed by message id.
#[derive(Debug, Clone, Default)]
pub struct Messages {
    overrides: HashMap<String, String>,
}

impl Messages {
    /// A catalog with no overrides; every lookup yields its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog with the given overrides.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Look up `key`, falling back to `default`, and substitute `{0}`, `{1}`,
    /// ... with `args`.
    pub fn localize(&self, key: &str, default: &str, args: &[&str]) -> String {
        let template = self
            .overrides
            .get(key)
            .map(String::as_str)
            .unwrap_or(default);
        format_message(template, args)
    }
}

/// Replace `{n}` placeholders with the matching argument.
///
/// Placeholders without a matching argument are left as written.
pub fn format_message(template: &str, args: &[&str]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
