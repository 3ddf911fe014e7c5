//! Placeholder substitution used by the tracing backend

use std::fmt::{self, Write};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("placeholder {index} has no argument ({available} supplied)")]
    MissingArgument { index: usize, available: usize },

    #[error("invalid placeholder at byte {0}")]
    InvalidPlaceholder(usize),

    #[error("unmatched '}}' at byte {0}")]
    UnmatchedBrace(usize),
}

/// Render `template` against `args`.
///
/// Supports `{}` (next argument), `{N}` (argument N) and the `{{` / `}}`
/// escapes. Unused arguments are ignored.
pub fn render_template(
    template: &str,
    args: &[&dyn fmt::Display],
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut next = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut spec = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(c);
                }
                if !closed {
                    return Err(TemplateError::InvalidPlaceholder(pos));
                }

                let index = if spec.is_empty() {
                    next += 1;
                    next - 1
                } else {
                    spec.trim()
                        .parse::<usize>()
                        .map_err(|_| TemplateError::InvalidPlaceholder(pos))?
                };

                let arg = args.get(index).ok_or(TemplateError::MissingArgument {
                    index,
                    available: args.len(),
                })?;
                // Writing into a String cannot fail
                let _ = write!(out, "{}", arg);
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(TemplateError::UnmatchedBrace(pos)),
            c => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_placeholders() {
        let rendered = render_template("x={} y={}", &[&5, &"six"]).unwrap();
        assert_eq!(rendered, "x=5 y=six");
    }

    #[test]
    fn test_positional_placeholders() {
        let rendered = render_template("{1} before {0}, {1} again", &[&"a", &"b"]).unwrap();
        assert_eq!(rendered, "b before a, b again");
    }

    #[test]
    fn test_escaped_braces() {
        let rendered = render_template("{{literal}} {}", &[&1]).unwrap();
        assert_eq!(rendered, "{literal} 1");
    }

    #[test]
    fn test_no_placeholders_passes_text_through() {
        let rendered = render_template("x=%d", &[&5]).unwrap();
        assert_eq!(rendered, "x=%d");
    }

    #[test]
    fn test_missing_argument() {
        let err = render_template("{} {}", &[&1]).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingArgument {
                index: 1,
                available: 1
            }
        );
    }

    #[test]
    fn test_invalid_placeholders() {
        assert_eq!(
            render_template("value {abc}", &[&1]).unwrap_err(),
            TemplateError::InvalidPlaceholder(6)
        );
        assert_eq!(
            render_template("open {", &[]).unwrap_err(),
            TemplateError::InvalidPlaceholder(5)
        );
        assert_eq!(
            render_template("close }", &[]).unwrap_err(),
            TemplateError::UnmatchedBrace(6)
        );
    }
}
