//! JavaScript / TypeScript dialect (`synvert-core` npm package)

use super::{push_body, quoted, DialectTemplate, SnippetParts};
use crate::language::LanguageFamily;

/// Parser passed to `configure`; it handles both JavaScript and TypeScript
const PARSER: &str = "typescript";

#[derive(Debug, Clone, Copy, Default)]
pub struct EcmaScriptTemplate;

impl DialectTemplate for EcmaScriptTemplate {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::EcmaScript
    }

    fn render(&self, parts: &SnippetParts<'_>) -> String {
        let mut out = String::from("const Synvert = require(\"synvert-core\");\n\n");
        out.push_str("Synvert.Rewriter.execute(() => {\n");
        out.push_str(&format!("  configure({{ parser: {} }});\n", quoted(PARSER, '"')));

        if let Some(node) = parts.runtime {
            out.push_str(&format!("  ifNode({});\n", quoted(&node.version_spec, '"')));
        }
        if let Some(npm) = parts.dependency {
            out.push_str(&format!(
                "  ifNpm({}, {});\n",
                quoted(&npm.subject, '"'),
                quoted(&npm.version_spec, '"')
            ));
        }

        out.push_str(&format!("  withinFiles({}, () => {{\n", quoted(parts.file_pattern, '\'')));
        push_body(&mut out, parts.body);
        out.push_str("  });\n");
        out.push_str("});");
        out
    }
}
