//! Editing state for an interactive snippet session
//!
//! Every edit replaces values instead of mutating shared collections, and
//! bodies coming back from the generator are tagged with the revision they
//! were requested at so a late answer can't overwrite newer input.

use crate::assembler::{self, RenderedSnippet, SnippetRequest};
use crate::error::Result;
use crate::language::Language;
use crate::provider::GenerateRequest;

/// One input/output source pair used to infer a transformation body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamplePair {
    pub input: String,
    pub output: String,
}

/// Immutable list of example pairs; edits return a new list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamplePairs {
    pairs: Vec<ExamplePair>,
}

impl Default for ExamplePairs {
    fn default() -> Self {
        Self {
            pairs: vec![ExamplePair::default()],
        }
    }
}

impl ExamplePairs {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExamplePair> {
        self.pairs.iter()
    }

    /// Copy with the input at `index` replaced; out-of-range indexes are ignored
    pub fn with_input(&self, index: usize, code: impl Into<String>) -> Self {
        let mut pairs = self.pairs.clone();
        if let Some(pair) = pairs.get_mut(index) {
            pair.input = code.into();
        }
        Self { pairs }
    }

    /// Copy with the output at `index` replaced; out-of-range indexes are ignored
    pub fn with_output(&self, index: usize, code: impl Into<String>) -> Self {
        let mut pairs = self.pairs.clone();
        if let Some(pair) = pairs.get_mut(index) {
            pair.output = code.into();
        }
        Self { pairs }
    }

    /// Copy with one more empty pair at the end
    pub fn with_empty_pair(&self) -> Self {
        let mut pairs = self.pairs.clone();
        pairs.push(ExamplePair::default());
        Self { pairs }
    }

    pub fn inputs(&self) -> Vec<String> {
        self.pairs.iter().map(|p| p.input.clone()).collect()
    }

    pub fn outputs(&self) -> Vec<String> {
        self.pairs.iter().map(|p| p.output.clone()).collect()
    }
}

/// Current inputs of one snippet being built
#[derive(Debug, Clone)]
pub struct SnippetSession {
    language: Language,
    extension: &'static str,
    file_pattern: String,
    runtime_version: String,
    dependency_version: String,
    examples: ExamplePairs,
    body: String,
    /// Bumped on every edit that invalidates a previously generated body
    revision: u64,
}

impl SnippetSession {
    pub fn new(language: Language) -> Self {
        let extension = language.extension();
        Self {
            language,
            extension,
            file_pattern: Language::default_file_pattern(extension),
            runtime_version: String::new(),
            dependency_version: String::new(),
            examples: ExamplePairs::default(),
            body: String::new(),
            revision: 0,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn extension(&self) -> &'static str {
        self.extension
    }

    pub fn file_pattern(&self) -> &str {
        &self.file_pattern
    }

    pub fn examples(&self) -> &ExamplePairs {
        &self.examples
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Switch language; everything else goes back to its default
    pub fn set_language(&mut self, language: Language) {
        let revision = self.revision + 1;
        *self = Self::new(language);
        self.revision = revision;
    }

    /// Switch extension; resets the pattern, versions, examples and body
    pub fn set_extension(&mut self, extension: &str) -> Result<()> {
        let extension = self.language.resolve_extension(Some(extension))?;
        let revision = self.revision + 1;
        *self = Self::new(self.language);
        self.extension = extension;
        self.file_pattern = Language::default_file_pattern(extension);
        self.revision = revision;
        Ok(())
    }

    pub fn set_file_pattern(&mut self, pattern: impl Into<String>) {
        self.file_pattern = pattern.into();
    }

    pub fn set_runtime_version(&mut self, raw: impl Into<String>) {
        self.runtime_version = raw.into();
    }

    pub fn set_dependency_version(&mut self, raw: impl Into<String>) {
        self.dependency_version = raw.into();
    }

    pub fn edit_input(&mut self, index: usize, code: impl Into<String>) {
        self.examples = self.examples.with_input(index, code);
        self.revision += 1;
    }

    pub fn edit_output(&mut self, index: usize, code: impl Into<String>) {
        self.examples = self.examples.with_output(index, code);
        self.revision += 1;
    }

    pub fn add_example(&mut self) {
        self.examples = self.examples.with_empty_pair();
        self.revision += 1;
    }

    /// Payload for the snippet generator, tagged with the current revision
    pub fn body_request(&self) -> (u64, GenerateRequest) {
        (
            self.revision,
            GenerateRequest {
                extension: self.extension.to_string(),
                inputs: self.examples.inputs(),
                outputs: self.examples.outputs(),
            },
        )
    }

    /// Store a generated body if it answers the current revision.
    /// Returns false and drops the body when the inputs have moved on.
    pub fn accept_body(&mut self, revision: u64, body: impl Into<String>) -> bool {
        if revision != self.revision {
            return false;
        }
        self.body = body.into();
        true
    }

    pub fn request(&self) -> SnippetRequest {
        SnippetRequest {
            language: self.language.id().to_string(),
            extension: Some(self.extension.to_string()),
            file_pattern: Some(self.file_pattern.clone()),
            runtime_version: self.runtime_version.clone(),
            dependency_version: self.dependency_version.clone(),
            body: self.body.clone(),
        }
    }

    /// Render the current inputs; always recomputed
    pub fn render(&self) -> Result<RenderedSnippet> {
        assembler::assemble(&self.request())
    }
}
