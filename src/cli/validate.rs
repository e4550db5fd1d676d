//! Validate command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{find_json_files, is_json_file, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::validate::{Severity, ValidationIssue, Validator};

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Execute the validate command
pub fn run_validate(files: &[PathBuf], dir: Option<&Path>, strict: bool, json: bool) -> ExitCode {
    let mut targets: Vec<PathBuf> = files.to_vec();
    if let Some(dir) = dir {
        if !dir.is_dir() {
            eprintln!("Error: '{}' is not a directory", dir.display());
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        targets.extend(find_json_files(dir));
    }

    if targets.is_empty() {
        eprintln!("Error: No files to validate");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut reports: Vec<(PathBuf, Vec<ValidationIssue>)> = Vec::new();
    for path in targets {
        if !is_json_file(&path) {
            tracing::debug!(path = %path.display(), "validating file without .json extension");
        }
        if !json {
            println!("Validating {}...", path.display());
        }
        let mut validator = Validator::new();
        if let Err(e) = validator.validate_file(&path) {
            eprintln!("Error: Cannot read '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        reports.push((path, validator.into_issues()));
    }

    let count = |severity: Severity| {
        reports.iter().flat_map(|(_, issues)| issues).filter(|i| i.severity == severity).count()
    };
    let error_count = count(Severity::Error);
    let warning_count = count(Severity::Warning);
    let has_failures = error_count > 0 || (strict && warning_count > 0);

    if json {
        let files: Vec<_> = reports
            .iter()
            .map(|(path, issues)| {
                serde_json::json!({
                    "file": path.display().to_string(),
                    "issues": issues,
                })
            })
            .collect();
        let output = serde_json::json!({
            "valid": !has_failures,
            "errors": error_count,
            "warnings": warning_count,
            "files": files,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else if error_count == 0 && warning_count == 0 {
        println!();
        println!("No issues found.");
    } else {
        println!();
        for (path, issues) in &reports {
            for issue in issues {
                eprintln!("{}: {}", path.display(), issue);
            }
        }

        println!();
        match (error_count, warning_count) {
            (0, w) => println!("Found {} warning{}.", w, plural(w)),
            (e, 0) => println!("Found {} error{}.", e, plural(e)),
            (e, w) => println!("Found {} error{}, {} warning{}.", e, plural(e), w, plural(w)),
        }

        if !strict && warning_count > 0 && error_count == 0 {
            println!("Hint: Run with --strict to treat warnings as errors.");
        }
    }

    if has_failures {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
