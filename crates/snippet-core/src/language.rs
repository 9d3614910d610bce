//! Language identifiers, dialect families and file extensions

use crate::error::{Result, SnippetError};
use std::fmt;

/// Synvert dialect shared by a group of languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFamily {
    Ruby,
    EcmaScript,
}

impl LanguageFamily {
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageFamily::Ruby => "Ruby",
            LanguageFamily::EcmaScript => "ECMAScript",
        }
    }
}

impl fmt::Display for LanguageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Supported source languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Ruby,
    JavaScript,
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Ruby, Language::JavaScript, Language::TypeScript];

    /// Canonical identifier, as used in request files and remote URLs
    pub fn id(&self) -> &'static str {
        match self {
            Language::Ruby => "ruby",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Ruby => "Ruby",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
        }
    }

    pub fn family(&self) -> LanguageFamily {
        match self {
            Language::Ruby => LanguageFamily::Ruby,
            Language::JavaScript | Language::TypeScript => LanguageFamily::EcmaScript,
        }
    }

    /// Accepted file extensions, default first
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Ruby => &["rb"],
            Language::JavaScript => &["js", "jsx"],
            Language::TypeScript => &["ts", "tsx"],
        }
    }

    pub fn extension(&self) -> &'static str {
        self.extensions()[0]
    }

    /// Subject of the runtime guard (`if_ruby` / `ifNode`)
    pub fn runtime_name(&self) -> &'static str {
        match self.family() {
            LanguageFamily::Ruby => "ruby",
            LanguageFamily::EcmaScript => "node",
        }
    }

    /// Human label for the dependency field (`if_gem` / `ifNpm`)
    pub fn dependency_kind(&self) -> &'static str {
        match self.family() {
            LanguageFamily::Ruby => "gem",
            LanguageFamily::EcmaScript => "npm",
        }
    }

    /// Pick an extension for this language; `None` means the default.
    pub fn resolve_extension(&self, requested: Option<&str>) -> Result<&'static str> {
        let requested = match requested.map(|e| e.trim().trim_start_matches('.')) {
            None | Some("") => return Ok(self.extension()),
            Some(ext) => ext,
        };

        self.extensions()
            .iter()
            .find(|ext| ext.eq_ignore_ascii_case(requested))
            .copied()
            .ok_or_else(|| SnippetError::UnsupportedExtension {
                language: self.id().to_string(),
                extension: requested.to_string(),
                expected: self.extensions().join(", "),
            })
    }

    /// Default glob for an extension
    pub fn default_file_pattern(extension: &str) -> String {
        format!("**/*.{}", extension)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Language {
    type Err = SnippetError;

    fn from_str(s: &str) -> Result<Self> {
        resolve(s)
    }
}

/// Resolve a language identifier. Unknown identifiers are an error; there is
/// no fallback language.
pub fn resolve(language_id: &str) -> Result<Language> {
    match language_id.trim().to_ascii_lowercase().as_str() {
        "ruby" | "rb" => Ok(Language::Ruby),
        "javascript" | "js" => Ok(Language::JavaScript),
        "typescript" | "ts" => Ok(Language::TypeScript),
        _ => Err(SnippetError::UnsupportedLanguage(language_id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ruby_ids_resolve_to_rb() {
        for id in ["ruby", "rb", "Ruby", " RUBY "] {
            let lang = resolve(id).unwrap();
            assert_eq!(lang.family(), LanguageFamily::Ruby);
            assert_eq!(lang.extension(), "rb");
        }
    }

    #[test]
    fn test_ecmascript_ids_resolve_to_family() {
        for id in ["javascript", "js", "typescript", "ts", "TypeScript"] {
            assert_eq!(resolve(id).unwrap().family(), LanguageFamily::EcmaScript);
        }
        assert_eq!(resolve("javascript").unwrap().extension(), "js");
        assert_eq!(resolve("typescript").unwrap().extension(), "ts");
    }

    #[test]
    fn test_unknown_language_is_an_error() {
        let err = resolve("python").unwrap_err();
        assert_eq!(err, SnippetError::UnsupportedLanguage("python".to_string()));
        assert!(resolve("").is_err());
    }

    #[test]
    fn test_resolve_extension() {
        assert_eq!(Language::TypeScript.resolve_extension(None).unwrap(), "ts");
        assert_eq!(Language::TypeScript.resolve_extension(Some("")).unwrap(), "ts");
        assert_eq!(Language::TypeScript.resolve_extension(Some(".tsx")).unwrap(), "tsx");
        assert_eq!(Language::JavaScript.resolve_extension(Some("JSX")).unwrap(), "jsx");

        let err = Language::Ruby.resolve_extension(Some("ts")).unwrap_err();
        assert!(matches!(err, SnippetError::UnsupportedExtension { .. }));
        assert!(err.to_string().contains("expected one of: rb"));
    }

    #[test]
    fn test_runtime_and_dependency_names() {
        assert_eq!(Language::Ruby.runtime_name(), "ruby");
        assert_eq!(Language::TypeScript.runtime_name(), "node");
        assert_eq!(Language::Ruby.dependency_kind(), "gem");
        assert_eq!(Language::JavaScript.dependency_kind(), "npm");
    }

    #[test]
    fn test_default_file_pattern() {
        assert_eq!(Language::default_file_pattern("rb"), "**/*.rb");
    }
}
