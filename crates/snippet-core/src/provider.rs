//! Transformation body providers
//!
//! The body of a snippet is inferred remotely from example input/output
//! pairs. This module defines the request/response payloads, the provider
//! trait, and an HTTP implementation built on reqwest. The same service can
//! also run a finished snippet against a piece of source code.

use crate::error::{Result, SnippetError};
use crate::language::Language;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::future::Future;
use url::Url;

/// Environment variable holding the snippet generator base URL
pub const API_URL_ENV: &str = "SYNVERT_API_URL";

/// Default user agent for HTTP requests
const USER_AGENT: &str = concat!("synvert-snippet/", env!("CARGO_PKG_VERSION"));

/// Payload sent to the snippet generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub extension: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// Snippet generator answer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub snippet: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateResponse {
    /// Turn the answer into a body; a missing snippet is an empty body
    pub fn into_body(self) -> Result<String> {
        match self.error {
            Some(error) if !error.is_empty() => Err(SnippetError::Provider(error)),
            _ => Ok(self.snippet.unwrap_or_default()),
        }
    }
}

/// Payload asking the service to run a snippet over one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRequest {
    pub extension: String,
    pub code: String,
    pub snippet: String,
}

/// Result of running a snippet: the rewritten source or an error
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParseResponse {
    #[serde(default)]
    pub output: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

impl ParseResponse {
    pub fn into_output(self) -> Result<String> {
        match self.error {
            Some(error) if !error.is_empty() => Err(SnippetError::Provider(error)),
            _ => Ok(self.output.unwrap_or_default()),
        }
    }
}

/// Source of transformation bodies
pub trait BodyProvider {
    fn generate(
        &self,
        language: Language,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Snippet generator reached over HTTP
pub struct HttpBodyProvider {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpBodyProvider {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).map_err(|_| SnippetError::InvalidEndpoint(endpoint.to_string()))?;
        if endpoint.cannot_be_a_base() {
            return Err(SnippetError::InvalidEndpoint(endpoint.to_string()));
        }
        Ok(Self {
            endpoint,
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        })
    }

    /// Create a provider from `SYNVERT_API_URL`, if set
    pub fn from_env() -> Option<Result<Self>> {
        std::env::var(API_URL_ENV).ok().map(|url| Self::new(&url))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `<endpoint>/<language>/generate-snippet`, keeping query parameters
    pub fn generate_url(&self, language: Language) -> Url {
        self.action_url(language, "generate-snippet")
    }

    /// `<endpoint>/<language>/parse-synvert-snippet`
    pub fn parse_url(&self, language: Language) -> Url {
        self.action_url(language, "parse-synvert-snippet")
    }

    fn action_url(&self, language: Language, action: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(language.id()).push(action);
        }
        url
    }

    /// Run `request.snippet` over `request.code` remotely and return the rewritten code
    pub async fn try_snippet(&self, language: Language, request: &ParseRequest) -> Result<String> {
        let answer: ParseResponse = self.post(self.parse_url(language), request).await?;
        answer.into_output()
    }

    async fn post<B, R>(&self, url: Url, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| SnippetError::provider(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(SnippetError::provider(format!(
                "{} answered HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SnippetError::provider(format!("invalid answer from {}: {}", url, e)))
    }
}

impl BodyProvider for HttpBodyProvider {
    async fn generate(&self, language: Language, request: &GenerateRequest) -> Result<String> {
        let answer: GenerateResponse = self.post(self.generate_url(language), request).await?;
        answer.into_body()
    }
}

/// Ask the provider for a body; any failure becomes an empty body and a warning
pub async fn fetch_body_or_empty<P: BodyProvider>(
    provider: &P,
    language: Language,
    request: &GenerateRequest,
) -> String {
    match provider.generate(language, request).await {
        Ok(body) => body,
        Err(e) => {
            eprintln!("{} {}", "Warning:".yellow(), e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<String>);

    impl BodyProvider for Fixed {
        async fn generate(&self, _language: Language, _request: &GenerateRequest) -> Result<String> {
            self.0.clone()
        }
    }

    fn request() -> GenerateRequest {
        GenerateRequest {
            extension: "rb".to_string(),
            inputs: vec!["foo.bar".to_string()],
            outputs: vec!["foo.baz".to_string()],
        }
    }

    #[test]
    fn test_generate_url_appends_segments() {
        let provider = HttpBodyProvider::new("https://api.example.test/v1?token=abc").unwrap();
        assert_eq!(
            provider.generate_url(Language::TypeScript).as_str(),
            "https://api.example.test/v1/typescript/generate-snippet?token=abc"
        );

        let provider = HttpBodyProvider::new("https://api.example.test/").unwrap();
        assert_eq!(
            provider.generate_url(Language::Ruby).as_str(),
            "https://api.example.test/ruby/generate-snippet"
        );
    }

    #[test]
    fn test_parse_url_shares_endpoint() {
        let provider = HttpBodyProvider::new("https://api.example.test/v1/").unwrap();
        assert_eq!(
            provider.parse_url(Language::JavaScript).as_str(),
            "https://api.example.test/v1/javascript/parse-synvert-snippet"
        );
    }

    #[test]
    fn test_parse_request_payload() {
        let request = ParseRequest {
            extension: "ts".to_string(),
            code: "foo.bar()".to_string(),
            snippet: "Synvert.Rewriter.execute(() => {});".to_string(),
        };
        let yaml = serde_yaml::to_string(&request).unwrap();
        assert!(yaml.contains("extension: ts"));
        assert!(yaml.contains("code: foo.bar()"));
        assert!(yaml.contains("snippet:"));
    }

    #[test]
    fn test_parse_response_into_output() {
        let ok: ParseResponse = serde_yaml::from_str("output: foo.baz()").unwrap();
        assert_eq!(ok.into_output().unwrap(), "foo.baz()");

        let blank_error: ParseResponse =
            serde_yaml::from_str("output: foo.baz()\nerror: ''").unwrap();
        assert_eq!(blank_error.into_output().unwrap(), "foo.baz()");

        let failed: ParseResponse =
            serde_yaml::from_str("error: undefined method `with_node`").unwrap();
        assert_eq!(
            failed.into_output().unwrap_err(),
            SnippetError::Provider("undefined method `with_node`".to_string())
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            HttpBodyProvider::new("not a url"),
            Err(SnippetError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            HttpBodyProvider::new("mailto:someone@example.test"),
            Err(SnippetError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_response_into_body() {
        let ok: GenerateResponse = serde_yaml::from_str("snippet: replaceText()").unwrap();
        assert_eq!(ok.into_body().unwrap(), "replaceText()");

        let missing: GenerateResponse = serde_yaml::from_str("{}").unwrap();
        assert_eq!(missing.into_body().unwrap(), "");

        let failed: GenerateResponse = serde_yaml::from_str("error: cannot infer").unwrap();
        assert_eq!(
            failed.into_body().unwrap_err(),
            SnippetError::Provider("cannot infer".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_body_or_empty() {
        let good = Fixed(Ok("with_node do\nend".to_string()));
        assert_eq!(
            fetch_body_or_empty(&good, Language::Ruby, &request()).await,
            "with_node do\nend"
        );

        let bad = Fixed(Err(SnippetError::provider("timeout")));
        assert_eq!(fetch_body_or_empty(&bad, Language::Ruby, &request()).await, "");
    }
}
