//! Check command - validate article headings

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use tocspy_core::{Config, HeadingNode, HeadingTree};
use tocspy_parser::MarkdownParser;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub files: usize,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the headings of every Markdown file under `path`.
pub fn run(path: &Path, strict: bool, config: &Config) -> Result<()> {
    tracing::info!(?path, strict, "Checking article headings");

    if !path.exists() {
        bail!("Path does not exist: {}", path.display());
    }

    let result = validate_path(path, config);

    println!("Checked {} file(s)", result.files);
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate every Markdown file under `path`.
pub fn validate_path(path: &Path, config: &Config) -> ValidationResult {
    let parser = MarkdownParser::with_settings(config.markdown.clone());
    let mut result = ValidationResult::default();

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let file = entry.path();
        let ext = file.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !matches!(ext, "md" | "markdown") {
            continue;
        }

        result.files += 1;
        match std::fs::read_to_string(file) {
            Ok(content) => validate_tree(file, &parser.headings(&content), &mut result),
            Err(e) => result.add_error(format!("{}: Failed to read file: {e}", file.display())),
        }
    }

    result
}

/// Validate one heading tree.
fn validate_tree(file: &Path, tree: &HeadingTree, result: &mut ValidationResult) {
    if tree.is_empty() {
        result.add_warning(format!("{}: no headings for the table of contents", file.display()));
        return;
    }

    for id in tree.duplicate_ids() {
        result.add_error(format!(
            "{}: duplicate anchor #{id}, highlighting will be ambiguous",
            file.display()
        ));
    }

    let mut empty = 0;
    count_empty_titles(tree.nodes(), &mut empty);
    if empty > 0 {
        result.add_warning(format!("{}: {empty} heading(s) without text", file.display()));
    }
}

fn count_empty_titles(nodes: &[HeadingNode], empty: &mut usize) {
    for node in nodes {
        if node.title.trim().is_empty() {
            *empty += 1;
        }
        count_empty_titles(&node.children, empty);
    }
}
