use std::collections::HashMap;

/// Replace `{{name}}` placeholders with values from `variables`. Unknown
/// placeholders are left verbatim ("any prompt-template syntax
/// beyond `{{name}}` placeholders" is explicitly the entire surface — no
/// conditionals, no loops, no escaping rules).
#[must_use]
pub fn interpolate(template: &str, variables: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let Some(close) = rest[open..].find("}}") else {
            out.push_str(rest);
            return out;
        };
        let close = open + close;
        out.push_str(&rest[..open]);

        let name = rest[open + 2..close].trim();
        match variables.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[open..close + 2]),
        }

        rest = &rest[close + 2..];
    }

    out.push_str(rest);
    out
}
