//! Synvert Snippet CLI - render runnable Synvert snippets

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use snippet_core::provider::{fetch_body_or_empty, API_URL_ENV};
use snippet_core::tui::PromptArgs;
use snippet_core::{
    assemble, read_source, HttpBodyProvider, Language, SnippetRequest, SnippetSession,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "synvert-snippet")]
#[command(about = "Assemble runnable Synvert snippets for Ruby, JavaScript and TypeScript")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a snippet from a body file and version fields
    Render(RenderArgs),
    /// Generate the body from input/output examples, then render the snippet
    Generate(GenerateArgs),
    /// Render a snippet and run it remotely against a source file
    Try(TryArgs),
    /// Walk through the snippet fields interactively
    Prompt(CliPromptArgs),
    /// List supported languages and their extensions
    Languages,
}

/// Fields shared by every rendering command
#[derive(ClapArgs, Debug, Default)]
pub struct SnippetFields {
    /// Language (ruby, javascript, typescript)
    #[arg(short, long)]
    pub language: Option<String>,

    /// File extension (defaults to the language's main extension)
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Glob passed to within_files (defaults to **/*.<extension>)
    #[arg(short = 'p', long = "file-pattern")]
    pub file_pattern: Option<String>,

    /// Minimum runtime version, e.g. 3.1.2 or 18.7.0
    #[arg(long = "runtime-version")]
    pub runtime_version: Option<String>,

    /// Dependency requirement, e.g. "rails ~> 7.0.3" or "express ^4.18.1"
    #[arg(long = "dependency-version")]
    pub dependency_version: Option<String>,

    /// Write the snippet to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl SnippetFields {
    /// Overlay flags on top of a base request
    fn apply(&self, mut request: SnippetRequest) -> SnippetRequest {
        if let Some(language) = &self.language {
            request.language = language.clone();
        }
        if self.extension.is_some() {
            request.extension = self.extension.clone();
        }
        if self.file_pattern.is_some() {
            request.file_pattern = self.file_pattern.clone();
        }
        if let Some(runtime) = &self.runtime_version {
            request.runtime_version = runtime.clone();
        }
        if let Some(dependency) = &self.dependency_version {
            request.dependency_version = dependency.clone();
        }
        request
    }
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub fields: SnippetFields,

    /// YAML or JSON request file; flags override its fields
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    /// File holding the transformation body ("-" reads stdin)
    #[arg(short, long = "body-file")]
    pub body_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub fields: SnippetFields,

    /// Source file before the transformation (repeatable, paired with --expected)
    #[arg(short, long = "input", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Source file after the transformation (repeatable, paired with --input)
    #[arg(short = 'x', long = "expected", required = true)]
    pub expected: Vec<PathBuf>,

    /// Base URL of the snippet generator
    #[arg(long = "api-url", env = API_URL_ENV)]
    pub api_url: String,
}

#[derive(Parser, Debug)]
pub struct TryArgs {
    #[command(flatten)]
    pub fields: SnippetFields,

    /// YAML or JSON request file; flags override its fields
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    /// File holding the transformation body ("-" reads stdin)
    #[arg(short, long = "body-file")]
    pub body_file: Option<PathBuf>,

    /// Source code the snippet is run against
    #[arg(short, long, required = true)]
    pub source: PathBuf,

    /// Base URL of the snippet service
    #[arg(long = "api-url", env = API_URL_ENV)]
    pub api_url: String,
}

#[derive(Parser, Debug)]
pub struct CliPromptArgs {
    /// Language (ruby, javascript, typescript)
    #[arg(short, long)]
    pub language: Option<String>,

    /// File holding an already generated body
    #[arg(short, long = "body-file")]
    pub body_file: Option<PathBuf>,

    /// Base URL of the snippet generator
    #[arg(long = "api-url", env = API_URL_ENV)]
    pub api_url: Option<String>,

    /// Write the snippet to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliPromptArgs> for PromptArgs {
    fn from(args: CliPromptArgs) -> Self {
        PromptArgs {
            language: args.language,
            body_file: args.body_file,
            api_url: args.api_url,
            output: args.output,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Some(Command::Render(render_args)) => render(render_args).await,
        Some(Command::Generate(generate_args)) => generate(generate_args).await,
        Some(Command::Try(try_args)) => try_snippet(try_args).await,
        Some(Command::Languages) => {
            list_languages();
            Ok(())
        }
        Some(Command::Prompt(prompt_args)) => {
            let result = snippet_core::run(prompt_args.into()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        None => {
            // No subcommand provided, default to interactive mode
            let result = snippet_core::run(PromptArgs::default()).await;
            let _ = console::Term::stderr().show_cursor();
            result
        }
    }
}

async fn render(args: RenderArgs) -> Result<()> {
    let request = build_request(&args.fields, args.request.as_deref(), args.body_file.as_deref())
        .await?;
    emit(&request, args.fields.output.as_deref())
}

async fn try_snippet(args: TryArgs) -> Result<()> {
    let request = build_request(&args.fields, args.request.as_deref(), args.body_file.as_deref())
        .await?;
    let snippet = assemble(&request)?;
    for warning in snippet.warnings() {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }

    let code = read_source(&args.source)?;
    let provider = HttpBodyProvider::new(&args.api_url)?;
    eprintln!(
        "{} {}",
        "Running snippet via".dimmed(),
        provider.parse_url(snippet.language).as_str().cyan()
    );
    let output = provider
        .try_snippet(snippet.language, &snippet.parse_request(code))
        .await?;

    match args.fields.output.as_deref() {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} {}", "Wrote".green().bold(), path.display());
        }
        None => println!("{}", output),
    }

    Ok(())
}

/// Merge the request file, flags and body file into one request
async fn build_request(
    fields: &SnippetFields,
    request_file: Option<&Path>,
    body_file: Option<&Path>,
) -> Result<SnippetRequest> {
    let base = match request_file {
        Some(path) => SnippetRequest::load(path).await?,
        None => SnippetRequest::default(),
    };
    let mut request = fields.apply(base);

    if request.language.trim().is_empty() {
        anyhow::bail!("No language given. Pass --language or a request file with `language`.");
    }
    if let Some(path) = body_file {
        request.body = read_source(path)?;
    }

    Ok(request)
}

async fn generate(args: GenerateArgs) -> Result<()> {
    let language: Language = args
        .fields
        .language
        .as_deref()
        .context("No language given. Pass --language.")?
        .parse()?;

    if args.inputs.len() != args.expected.len() {
        anyhow::bail!(
            "Got {} --input file(s) but {} --expected file(s); they must pair up",
            args.inputs.len(),
            args.expected.len()
        );
    }

    let mut session = SnippetSession::new(language);
    if let Some(extension) = &args.fields.extension {
        session.set_extension(extension)?;
    }
    for (index, (input, expected)) in args.inputs.iter().zip(&args.expected).enumerate() {
        if index > 0 {
            session.add_example();
        }
        session.edit_input(index, read_source(input)?);
        session.edit_output(index, read_source(expected)?);
    }

    let provider = HttpBodyProvider::new(&args.api_url)?;
    let (revision, body_request) = session.body_request();
    eprintln!(
        "{} {}",
        "Generating snippet via".dimmed(),
        provider.generate_url(language).as_str().cyan()
    );
    let body = fetch_body_or_empty(&provider, language, &body_request).await;
    session.accept_body(revision, body);

    let request = args.fields.apply(session.request());
    emit(&request, args.fields.output.as_deref())
}

/// Render, report lint warnings, and write the snippet
fn emit(request: &SnippetRequest, output: Option<&Path>) -> Result<()> {
    let snippet = assemble(request)?;

    for warning in snippet.warnings() {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }

    match output {
        Some(path) => {
            std::fs::write(path, snippet.text())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} {}", "Wrote".green().bold(), path.display());
        }
        None => println!("{}", snippet.text()),
    }

    Ok(())
}

fn list_languages() {
    println!("{}", "Supported languages".cyan().bold());
    println!();
    for lang in Language::ALL {
        println!(
            "  {} {:<12} {:<12} {}",
            "->".blue(),
            lang.id(),
            lang.family().display_name(),
            lang.extensions()
                .iter()
                .map(|e| format!(".{}", e))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
}
