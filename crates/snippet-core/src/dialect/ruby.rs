//! Ruby dialect (`synvert-core` gem)

use super::{push_body, quoted, DialectTemplate, SnippetParts};
use crate::language::LanguageFamily;

#[derive(Debug, Clone, Copy, Default)]
pub struct RubyTemplate;

impl DialectTemplate for RubyTemplate {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::Ruby
    }

    fn render(&self, parts: &SnippetParts<'_>) -> String {
        let mut out = String::from("Synvert::Rewriter.execute do\n");

        if let Some(runtime) = parts.runtime {
            out.push_str(&format!("  if_ruby {}\n", quoted(&runtime.version_spec, '\'')));
        }
        if let Some(gem) = parts.dependency {
            out.push_str(&format!(
                "  if_gem {}, {}\n",
                quoted(&gem.subject, '\''),
                quoted(&gem.version_spec, '\'')
            ));
        }

        out.push_str(&format!("  within_files {} do\n", quoted(parts.file_pattern, '\'')));
        push_body(&mut out, parts.body);
        out.push_str("  end\n");
        out.push_str("end");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::VersionConstraint;

    fn parts<'a>(
        runtime: Option<&'a VersionConstraint>,
        dependency: Option<&'a VersionConstraint>,
        body: &'a str,
    ) -> SnippetParts<'a> {
        SnippetParts {
            file_pattern: "**/*.rb",
            runtime,
            dependency,
            body,
        }
    }

    #[test]
    fn test_render_runtime_guard_empty_body() {
        let ruby = VersionConstraint::new("ruby", "3.1.2");
        let out = RubyTemplate.render(&parts(Some(&ruby), None, ""));
        assert_eq!(
            out,
            "Synvert::Rewriter.execute do\n  if_ruby '3.1.2'\n  within_files '**/*.rb' do\n  end\nend"
        );
    }

    #[test]
    fn test_render_both_guards_and_body() {
        let ruby = VersionConstraint::new("ruby", "3.1.2");
        let rails = VersionConstraint::new("rails", "~> 7.0.3");
        let body = "find_node '.send[message=foo]' do\n  replace :message, with: 'bar'\nend";
        let out = RubyTemplate.render(&parts(Some(&ruby), Some(&rails), body));
        assert_eq!(
            out,
            "Synvert::Rewriter.execute do\n\
             \x20 if_ruby '3.1.2'\n\
             \x20 if_gem 'rails', '~> 7.0.3'\n\
             \x20 within_files '**/*.rb' do\n\
             \x20   find_node '.send[message=foo]' do\n\
             \x20     replace :message, with: 'bar'\n\
             \x20   end\n\
             \x20 end\n\
             end"
        );
    }

    #[test]
    fn test_render_gem_guard_only() {
        let rails = VersionConstraint::new("rails", ">= 6.1");
        let out = RubyTemplate.render(&parts(None, Some(&rails), ""));
        assert!(!out.contains("if_ruby"));
        assert!(out.contains("  if_gem 'rails', '>= 6.1'\n  within_files"));
    }
}
