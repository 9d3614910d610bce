//! Charm-style CLI prompts using cliclack

use crate::constraint;
use crate::language::{self, Language};
use crate::provider::{BodyProvider, HttpBodyProvider};
use crate::session::SnippetSession;
use crate::source::read_source;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the interactive flow
#[derive(Debug, Clone, Default)]
pub struct PromptArgs {
    /// Language identifier; prompts when missing
    pub language: Option<String>,

    /// File holding an already generated body
    pub body_file: Option<PathBuf>,

    /// Snippet generator endpoint (falls back to SYNVERT_API_URL)
    pub api_url: Option<String>,

    /// Where to save the rendered snippet
    pub output: Option<PathBuf>,

    /// Accept defaults instead of prompting where possible
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run(args: PromptArgs) -> Result<()> {
    cliclack::intro("Synvert Snippet")?;

    // Step 1: Language and extension
    let language = select_language(&args)?;
    let mut session = SnippetSession::new(language);
    select_extension(&mut session, &args)?;

    // Step 2: File pattern and version guards
    select_file_pattern(&mut session, &args)?;
    select_versions(&mut session, &args)?;

    // Step 3: Transformation body
    select_body(&mut session, &args).await?;

    // Step 4: Render
    let snippet = session.render()?;
    for warning in snippet.warnings() {
        cliclack::log::warning(warning)?;
    }

    // Step 5: Show or save
    write_snippet(snippet.text(), args.output.as_deref(), args.yes)?;

    Ok(())
}

fn select_language(args: &PromptArgs) -> Result<Language> {
    if let Some(id) = &args.language {
        let language = language::resolve(id)?;
        cliclack::log::info(format!("Using language: {}", language))?;
        return Ok(language);
    }

    let mut select = cliclack::select("Select a language");
    for lang in Language::ALL {
        select = select.item(lang, lang.display_name(), lang.family().display_name());
    }
    Ok(select.interact()?)
}

fn select_extension(session: &mut SnippetSession, args: &PromptArgs) -> Result<()> {
    let extensions = session.language().extensions();
    if extensions.len() == 1 || args.yes {
        return Ok(());
    }

    let mut select = cliclack::select("Select a file extension");
    for ext in extensions {
        select = select.item(*ext, format!(".{}", ext), "");
    }
    let extension: &str = select.interact()?;
    session.set_extension(extension)?;
    Ok(())
}

fn select_file_pattern(session: &mut SnippetSession, args: &PromptArgs) -> Result<()> {
    if args.yes {
        cliclack::log::info(format!("File pattern: {}", session.file_pattern()))?;
        return Ok(());
    }

    let default = session.file_pattern().to_string();
    let pattern: String = cliclack::input("File pattern")
        .placeholder(&default)
        .default_input(&default)
        .interact()?;
    session.set_file_pattern(pattern);
    Ok(())
}

fn select_versions(session: &mut SnippetSession, args: &PromptArgs) -> Result<()> {
    if args.yes {
        return Ok(());
    }

    let language = session.language();
    let (runtime_example, dependency_example) = match language {
        Language::Ruby => ("e.g. 3.1.2", "e.g. rails ~> 7.0.3"),
        Language::JavaScript | Language::TypeScript => ("e.g. 18.7.0", "e.g. express ^4.18.1"),
    };

    let runtime: String = cliclack::input(format!("Minimum {} version", language.runtime_name()))
        .placeholder(runtime_example)
        .required(false)
        .validate(move |input: &String| {
            constraint::parse_runtime(language, input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact()?;
    session.set_runtime_version(runtime);

    let dependency: String =
        cliclack::input(format!("{} version", language.dependency_kind()))
            .placeholder(dependency_example)
            .required(false)
            .validate(|input: &String| {
                constraint::parse(input)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact()?;
    session.set_dependency_version(dependency);

    Ok(())
}

async fn select_body(session: &mut SnippetSession, args: &PromptArgs) -> Result<()> {
    if let Some(path) = &args.body_file {
        let body = read_source(path)?;
        session.accept_body(session.revision(), body);
        cliclack::log::info(format!("Using body from {}", path.display()))?;
        return Ok(());
    }

    if args.yes {
        cliclack::log::info("No body given, rendering an empty within-files block")?;
        return Ok(());
    }

    let source: &str = cliclack::select("Where does the transformation body come from?")
        .item("generate", "Generate from input/output examples", "")
        .item("file", "Read from a file", "")
        .item("empty", "Leave empty", "")
        .interact()?;

    match source {
        "generate" => generate_body(session, args).await,
        "file" => {
            let path: String = cliclack::input("Body file").interact()?;
            let body = read_source(Path::new(&path))?;
            session.accept_body(session.revision(), body);
            Ok(())
        }
        _ => Ok(()),
    }
}

async fn generate_body(session: &mut SnippetSession, args: &PromptArgs) -> Result<()> {
    let provider = match &args.api_url {
        Some(url) => HttpBodyProvider::new(url)?,
        None => match HttpBodyProvider::from_env() {
            Some(provider) => provider?,
            None => {
                cliclack::log::warning(format!(
                    "No snippet generator configured (set {} or pass --api-url)",
                    crate::provider::API_URL_ENV
                ))?;
                return Ok(());
            }
        },
    };

    let mut index = 0;
    loop {
        if index > 0 {
            session.add_example();
        }
        let input: String = cliclack::input(format!("Input example #{} (file)", index + 1))
            .interact()?;
        session.edit_input(index, read_source(Path::new(&input))?);

        let output: String = cliclack::input(format!("Output example #{} (file)", index + 1))
            .interact()?;
        session.edit_output(index, read_source(Path::new(&output))?);

        let more: bool = cliclack::confirm("Add another example?")
            .initial_value(false)
            .interact()?;
        if !more {
            break;
        }
        index += 1;
    }

    let (revision, request) = session.body_request();
    let spinner = cliclack::spinner();
    spinner.start(format!("Generating snippet via {}...", provider.endpoint()));

    match provider.generate(session.language(), &request).await {
        Ok(body) => {
            spinner.stop("Snippet generated");
            session.accept_body(revision, body);
        }
        Err(e) => {
            spinner.stop("Snippet generation failed");
            cliclack::log::warning(format!("{} (continuing with an empty body)", e))?;
        }
    }

    Ok(())
}

fn write_snippet(text: &str, output: Option<&Path>, yes: bool) -> Result<()> {
    let target = match output {
        Some(path) => Some(path.to_path_buf()),
        None if yes => None,
        None => {
            let path: String = cliclack::input("Save to file (leave empty to print)")
                .required(false)
                .interact()?;
            (!path.trim().is_empty()).then(|| PathBuf::from(path.trim()))
        }
    };

    match target {
        Some(path) => {
            std::fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            cliclack::outro(format!("Snippet written to {}", path.display()))?;
        }
        None => {
            cliclack::outro("Snippet ready")?;
            println!();
            println!("{}", text);
        }
    }

    Ok(())
}
