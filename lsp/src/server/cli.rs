use anyhow::Context;
use std::path::{Component, Path};
use tower_lsp::lsp_types::DiagnosticSeverity;

use crate::analyzer::DockerAnalyzer;

const USAGE: &str = "Usage: dockerls --analyze [--errors-only] <relative-file-path>\n  --analyze <file>     : Full analysis with JSON output\n  --errors-only        : Show only errors in simple format\n  --stdio              : Run the language server on stdio (default)";

/// Runs the one-shot analysis mode when `--analyze` is on the command line.
/// `Ok(None)` means the language server should start instead.
pub(crate) fn try_cli_analyze() -> anyhow::Result<Option<String>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    analyze_args(&args)
}

pub(crate) fn analyze_args(args: &[String]) -> anyhow::Result<Option<String>> {
    let Some(i) = args.iter().position(|a| a == "--analyze") else {
        return Ok(None);
    };
    let path = args[i + 1..]
        .iter()
        .find(|a| !a.starts_with("--"))
        .ok_or_else(|| anyhow::anyhow!(USAGE))?;
    let errors_only = args.iter().any(|a| a == "--errors-only");
    let content = read_file_content(path)?;
    analyze_content(&content, errors_only).map(Some)
}

pub(crate) fn analyze_content(content: &str, errors_only: bool) -> anyhow::Result<String> {
    let analyzer = DockerAnalyzer::new();
    let analysis = analyzer.analyze(content);

    if errors_only {
        let errors: Vec<String> = analysis
            .diagnostics
            .iter()
            .filter(|d| d.severity == Some(DiagnosticSeverity::ERROR))
            .map(|d| {
                format!(
                    "Line {}:{}: {}",
                    d.range.start.line + 1,
                    d.range.start.character + 1,
                    d.message
                )
            })
            .collect();
        if errors.is_empty() {
            return Ok("No errors found".to_string());
        }
        return Ok(errors.join("\n"));
    }

    let tokens: Vec<[u32; 5]> = analyzer
        .semantic_tokens(&analysis.model)
        .iter()
        .map(|t| {
            [
                t.delta_line,
                t.delta_start,
                t.length,
                t.token_type,
                t.token_modifiers_bitset,
            ]
        })
        .collect();
    let output = serde_json::json!({
        "diagnostics": analysis.diagnostics,
        "symbols": analysis.symbols,
        "semantic_tokens": tokens,
    });
    serde_json::to_string_pretty(&output).context("Failed to serialize analysis")
}

pub(crate) fn is_safe_path(path: &str) -> bool {
    let path = Path::new(path);

    if path.as_os_str().is_empty() || path.is_absolute() {
        return false;
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return false;
    }

    let s = path.to_string_lossy();
    if s.chars().any(|c| matches!(c, '\0' | '\n' | '\r' | '\t')) {
        return false;
    }
    // Windows drive prefixes such as `C:`
    !(s.len() >= 2 && s.as_bytes()[1] == b':')
}

pub(crate) fn read_file_content(path: &str) -> anyhow::Result<String> {
    if !is_safe_path(path) {
        return Err(anyhow::anyhow!("Unsafe file path: {}", path));
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file '{}'", path))
}
