//! Dialect templates for rendering Synvert snippets
//!
//! Each [`LanguageFamily`] maps to exactly one template. Templates only lay
//! out text: constraints arrive already parsed and the body is never
//! inspected.

mod ecmascript;
mod ruby;

use crate::constraint::VersionConstraint;
use crate::language::LanguageFamily;

pub use ecmascript::EcmaScriptTemplate;
pub use ruby::RubyTemplate;

/// Indentation of body lines inside the within-files wrapper
pub const BODY_INDENT: &str = "    ";

/// Resolved inputs for a single render
#[derive(Debug, Clone, Copy)]
pub struct SnippetParts<'a> {
    pub file_pattern: &'a str,
    pub runtime: Option<&'a VersionConstraint>,
    pub dependency: Option<&'a VersionConstraint>,
    pub body: &'a str,
}

/// Renders a complete snippet in one Synvert dialect
pub trait DialectTemplate: Send + Sync {
    fn family(&self) -> LanguageFamily;

    fn render(&self, parts: &SnippetParts<'_>) -> String;
}

/// Select the template for a family
pub fn template_for(family: LanguageFamily) -> &'static dyn DialectTemplate {
    match family {
        LanguageFamily::Ruby => &RubyTemplate,
        LanguageFamily::EcmaScript => &EcmaScriptTemplate,
    }
}

/// Append the body nested inside the wrapper. Every line break in the body is
/// followed by the wrapper indentation; an empty body adds nothing.
pub(crate) fn push_body(out: &mut String, body: &str) {
    if body.is_empty() {
        return;
    }
    out.push_str(BODY_INDENT);
    out.push_str(&body.replace('\n', &format!("\n{}", BODY_INDENT)));
    out.push('\n');
}

/// Quote `value` with `quote`, escaping backslashes, the quote itself and
/// line breaks so the literal always stays on one line
pub(crate) fn quoted(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == '\\' || c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
