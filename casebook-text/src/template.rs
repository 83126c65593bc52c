//! `$n` template expansion for rule labels and tooltips

use regex::Captures;

/// Expand `$n` references in `template` with the groups of `caps`.
///
/// Every occurrence is replaced. A group that did not participate in the match, or
/// that the pattern does not have, expands to the empty string. A `$` that is not
/// followed by a digit is kept as is.
pub fn expand(template: &str, caps: &Captures) -> String {
    expand_with(template, |index| caps.get(index).map(|m| m.as_str()))
}

pub(crate) fn expand_with<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(usize) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            out.push('$');
            rest = after;
            continue;
        }
        if let Some(value) = after[..digits].parse::<usize>().ok().and_then(&lookup) {
            out.push_str(value);
        }
        rest = &after[digits..];
    }
    out.push_str(rest);
    out
}

/// Remove `{` and `}` from a brace-rule label.
pub fn strip_braces(text: &str) -> String {
    text.chars().filter(|c| *c != '{' && *c != '}').collect()
}
