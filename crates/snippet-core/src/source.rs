//! Reading bodies and example sources from disk or stdin

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read a source file ("-" for stdin) without its final line break
pub fn read_source(path: &Path) -> Result<String> {
    let content = if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        content
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    Ok(strip_final_newline(&content).to_string())
}

/// Drop trailing line breaks so the text nests without a blank last line
pub fn strip_final_newline(content: &str) -> &str {
    content.trim_end_matches(['\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_final_newline() {
        assert_eq!(strip_final_newline("foo.bar\n"), "foo.bar");
        assert_eq!(strip_final_newline("foo.bar\r\n\r\n"), "foo.bar");
        assert_eq!(strip_final_newline("a\n\nb"), "a\n\nb");
        assert_eq!(strip_final_newline("  indented  "), "  indented  ");
        assert_eq!(strip_final_newline("\n"), "");
    }

    #[test]
    fn test_read_source_from_file() {
        let path = std::env::temp_dir().join(format!(
            "synvert-snippet-source-{}.rb",
            std::process::id()
        ));
        std::fs::write(&path, "with_node do\nend\n").unwrap();

        let body = read_source(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(body, "with_node do\nend");
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("/nonexistent/body.rb")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/body.rb"));
    }
}
