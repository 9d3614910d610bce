//! Snippet assembly: from raw request fields to a rendered script

use crate::constraint::{self, VersionConstraint};
use crate::dialect::{template_for, SnippetParts};
use crate::error::Result;
use crate::language::{self, Language, LanguageFamily};
use crate::provider::ParseRequest;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Raw fields as collected from a form, a request file or CLI flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetRequest {
    /// Language identifier (`ruby`, `javascript`, `typescript`)
    #[serde(alias = "languageId")]
    pub language: String,

    /// File extension; defaults to the language's first extension
    #[serde(default)]
    pub extension: Option<String>,

    /// Glob for within_files; defaults to `**/*.<extension>`
    #[serde(default, alias = "filePattern")]
    pub file_pattern: Option<String>,

    /// Minimum runtime version, e.g. `3.1.2`
    #[serde(default, alias = "runtimeVersionRaw")]
    pub runtime_version: String,

    /// Dependency requirement, e.g. `rails ~> 7.0.3`
    #[serde(default, alias = "dependencyVersionRaw")]
    pub dependency_version: String,

    /// Transformation body produced by the snippet generator
    #[serde(default)]
    pub body: String,
}

impl SnippetRequest {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// Parse a request from YAML (JSON documents parse too)
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse snippet request")
    }

    /// Load a request file
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid request in {}", path.display()))
    }
}

/// A rendered snippet along with the inputs it was resolved from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSnippet {
    pub language: Language,
    pub extension: &'static str,
    pub file_pattern: String,
    pub runtime: Option<VersionConstraint>,
    pub dependency: Option<VersionConstraint>,
    pub text: String,
}

impl RenderedSnippet {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Advisory warnings about the version fields; never blocks rendering
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(runtime) = &self.runtime {
            warnings.extend(constraint::lint_runtime(runtime));
        }
        if let Some(dependency) = &self.dependency {
            warnings.extend(constraint::lint_dependency(self.language.family(), dependency));
        }
        warnings
    }

    /// Payload for running this snippet over `code`
    pub fn parse_request(&self, code: impl Into<String>) -> ParseRequest {
        ParseRequest {
            extension: self.extension.to_string(),
            code: code.into(),
            snippet: self.text.clone(),
        }
    }
}

/// Render a snippet from already-resolved fields.
///
/// Pure: the same arguments always produce the same text.
pub fn combine(
    family: LanguageFamily,
    file_pattern: &str,
    runtime: Option<&VersionConstraint>,
    dependency: Option<&VersionConstraint>,
    body: &str,
) -> String {
    template_for(family).render(&SnippetParts {
        file_pattern,
        runtime,
        dependency,
        body,
    })
}

/// Resolve every raw field of a request and render it
pub fn assemble(request: &SnippetRequest) -> Result<RenderedSnippet> {
    let language = language::resolve(&request.language)?;
    let extension = language.resolve_extension(request.extension.as_deref())?;

    let file_pattern = match request.file_pattern.as_deref().map(str::trim) {
        Some(pattern) if !pattern.is_empty() => pattern.to_string(),
        _ => Language::default_file_pattern(extension),
    };
    constraint::ensure_single_line("file pattern", &file_pattern)?;

    let runtime = constraint::parse_runtime(language, &request.runtime_version)?;
    let dependency = constraint::parse(&request.dependency_version)?;

    let text = combine(
        language.family(),
        &file_pattern,
        runtime.as_ref(),
        dependency.as_ref(),
        &request.body,
    );

    Ok(RenderedSnippet {
        language,
        extension,
        file_pattern,
        runtime,
        dependency,
        text,
    })
}

/// Render a request, collapsing any failure into an empty string
/// ("not renderable") for callers that only display text.
pub fn render_or_empty(request: &SnippetRequest) -> String {
    assemble(request).map(|s| s.text).unwrap_or_default()
}
