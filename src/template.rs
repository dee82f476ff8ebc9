//! Safe `{name}` substitution for file contents, file names and paths.
//!
//! Unlike a real template engine, unknown placeholders are not an error:
//! they are emitted verbatim so that files full of incidental braces (shell
//! scripts, input decks) survive the pass untouched. Substituted values are
//! never rescanned, so a value containing `{...}` cannot trigger further
//! expansion.

use crate::params::expand::ParamRow;

/// Replace every `{name}` in `text` with the matching value from `vars`.
///
/// A placeholder is `{`, one or more characters that are not braces, then
/// `}`. Names missing from `vars` stay in place, braces included. A `{`
/// that does not open a well-formed placeholder is kept as a literal and
/// scanning resumes at the next character; there is no escape sequence.
///
/// ```
/// use sower::params::expand::ParamRow;
/// use sower::template::substitute;
///
/// let mut vars = ParamRow::new();
/// vars.insert("last".to_string(), "Bond".into());
/// assert_eq!(substitute("{last}, {first} {last}", &vars), "Bond, {first} Bond");
/// ```
pub fn substitute(text: &str, vars: &ParamRow) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match placeholder_end(after) {
            Some(close) => {
                let name = &after[..close];
                match vars.get(name) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
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

/// Byte index of the `}` closing a placeholder opened just before `after`,
/// or `None` if the run up to the next brace is not a well-formed name.
fn placeholder_end(after: &str) -> Option<usize> {
    match after.find(|c| c == '{' || c == '}')? {
        0 => None,
        end if after.as_bytes()[end] == b'}' => Some(end),
        _ => None,
    }
}
