//! Version constraint parsing and advisory linting

use crate::error::{Result, SnippetError};
use crate::language::{Language, LanguageFamily};
use semver::{Version, VersionReq};

/// RubyGems requirement operators, longest first so `~>` wins over `>`
const GEM_OPERATORS: &[&str] = &["~>", ">=", "<=", "!=", "=", ">", "<"];

/// A parsed `subject version-spec` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionConstraint {
    pub subject: String,
    pub version_spec: String,
}

impl VersionConstraint {
    pub fn new(subject: impl Into<String>, version_spec: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            version_spec: version_spec.into(),
        }
    }
}

/// Parse a dependency field such as `rails ~> 7.0.3`.
///
/// The text before the first whitespace is the subject, everything after it
/// is the version spec. A blank field means "no constraint"; a single token
/// is rejected rather than turned into an empty subject.
pub fn parse(raw: &str) -> Result<Option<VersionConstraint>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.find(char::is_whitespace) {
        Some(idx) => {
            let (subject, rest) = trimmed.split_at(idx);
            let version_spec = rest.trim_start();
            ensure_single_line("dependency version", version_spec)?;
            Ok(Some(VersionConstraint::new(subject, version_spec)))
        }
        None => Err(SnippetError::malformed(
            "dependency version",
            raw,
            "expected '<name> <version>', e.g. 'rails ~> 7.0.3'",
        )),
    }
}

/// Parse a runtime field such as `3.1.2`; the subject is the language runtime.
pub fn parse_runtime(language: Language, raw: &str) -> Result<Option<VersionConstraint>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.contains(char::is_whitespace) {
        return Err(SnippetError::malformed(
            "runtime version",
            raw,
            "expected a single version, e.g. '3.1.2'",
        ));
    }
    Ok(Some(VersionConstraint::new(language.runtime_name(), trimmed)))
}

/// Reject values that would break out of a single-line string literal
pub fn ensure_single_line(field: &'static str, value: &str) -> Result<()> {
    if value.chars().any(char::is_control) {
        return Err(SnippetError::ControlCharacter {
            field,
            raw: value.to_string(),
        });
    }
    Ok(())
}

/// Warn about a runtime version the Synvert runtime is unlikely to understand.
/// Returns None when the version looks fine or can't be judged.
pub fn lint_runtime(constraint: &VersionConstraint) -> Option<String> {
    let spec = constraint.version_spec.strip_prefix('v').unwrap_or(&constraint.version_spec);
    if Version::parse(&pad_version(spec)).is_ok() {
        None
    } else {
        Some(format!(
            "{} version '{}' is not a plain version number",
            constraint.subject, constraint.version_spec
        ))
    }
}

/// Warn about a dependency spec that doesn't look like a gem or npm requirement.
pub fn lint_dependency(family: LanguageFamily, constraint: &VersionConstraint) -> Option<String> {
    let ok = match family {
        LanguageFamily::Ruby => constraint
            .version_spec
            .split(',')
            .all(|part| is_gem_requirement(part.trim())),
        LanguageFamily::EcmaScript => VersionReq::parse(&constraint.version_spec).is_ok(),
    };

    if ok {
        None
    } else {
        Some(format!(
            "'{}' does not look like a version requirement for {}",
            constraint.version_spec, constraint.subject
        ))
    }
}

/// Fill missing minor/patch components so `18` and `3.1` parse as semver
fn pad_version(spec: &str) -> String {
    let core_len = spec.find(['-', '+']).unwrap_or(spec.len());
    let (core, suffix) = spec.split_at(core_len);
    let mut parts: Vec<&str> = core.split('.').collect();
    while parts.len() < 3 {
        parts.push("0");
    }
    format!("{}{}", parts.join("."), suffix)
}

fn is_gem_requirement(part: &str) -> bool {
    let version = GEM_OPERATORS
        .iter()
        .find_map(|op| part.strip_prefix(op))
        .unwrap_or(part)
        .trim();

    version.starts_with(|c: char| c.is_ascii_digit())
        && version
            .split('.')
            .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gem_constraint() {
        let c = parse("rails ~> 7.0.3").unwrap().unwrap();
        assert_eq!(c, VersionConstraint::new("rails", "~> 7.0.3"));
    }

    #[test]
    fn test_parse_npm_constraint() {
        let c = parse("express ^4.18.1").unwrap().unwrap();
        assert_eq!(c.subject, "express");
        assert_eq!(c.version_spec, "^4.18.1");
    }

    #[test]
    fn test_parse_keeps_inner_whitespace() {
        let c = parse("  rails   >= 6.1, < 8  ").unwrap().unwrap();
        assert_eq!(c.subject, "rails");
        assert_eq!(c.version_spec, ">= 6.1, < 8");
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_single_token_is_rejected() {
        let err = parse("rails").unwrap_err();
        assert!(matches!(
            err,
            SnippetError::MalformedConstraint { field: "dependency version", .. }
        ));
    }

    #[test]
    fn test_parse_rejects_line_break_in_version_spec() {
        let err = parse("rails ~>\n7.0").unwrap_err();
        assert!(matches!(
            err,
            SnippetError::ControlCharacter { field: "dependency version", .. }
        ));
        assert!(parse("express ^4.18.1\t").is_ok());
    }

    #[test]
    fn test_ensure_single_line() {
        assert!(ensure_single_line("file pattern", "app/**/*.rb").is_ok());
        assert!(ensure_single_line("file pattern", "app/**\r/*.rb").is_err());
        assert!(ensure_single_line("file pattern", "app/\u{7}*.rb").is_err());
    }

    #[test]
    fn test_parse_runtime() {
        let c = parse_runtime(Language::Ruby, " 3.1.2 ").unwrap().unwrap();
        assert_eq!(c, VersionConstraint::new("ruby", "3.1.2"));

        let c = parse_runtime(Language::TypeScript, "18.7.0").unwrap().unwrap();
        assert_eq!(c.subject, "node");

        assert_eq!(parse_runtime(Language::Ruby, "").unwrap(), None);
        assert!(parse_runtime(Language::Ruby, "ruby 3.1").is_err());
    }

    #[test]
    fn test_lint_runtime() {
        assert!(lint_runtime(&VersionConstraint::new("ruby", "3.1.2")).is_none());
        assert!(lint_runtime(&VersionConstraint::new("node", "18")).is_none());
        assert!(lint_runtime(&VersionConstraint::new("node", "v18.7")).is_none());

        let warning = lint_runtime(&VersionConstraint::new("ruby", "three")).unwrap();
        assert!(warning.contains("three"));
    }

    #[test]
    fn test_lint_dependency() {
        let gem = VersionConstraint::new("rails", "~> 7.0.3");
        assert!(lint_dependency(LanguageFamily::Ruby, &gem).is_none());

        let gem_multi = VersionConstraint::new("rails", ">= 6.1, < 8");
        assert!(lint_dependency(LanguageFamily::Ruby, &gem_multi).is_none());

        let npm = VersionConstraint::new("express", "^4.18.1");
        assert!(lint_dependency(LanguageFamily::EcmaScript, &npm).is_none());

        let bad = VersionConstraint::new("rails", "latest");
        assert!(lint_dependency(LanguageFamily::Ruby, &bad).is_some());
        assert!(lint_dependency(LanguageFamily::EcmaScript, &bad).is_some());
    }
}
