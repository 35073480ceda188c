//! Core analysis logic — analyze files once (used by watch mode and normal
//! mode), plus the `--fix`/`--fix-dry-run` convergence loop.

use super::args::{Args, OutputFormat};
use super::config_build::build_config;
use super::files::{expand_paths, filter_ignored};
use mstyle::engine::{self, DEFAULT_FIX_PASSES};
use mstyle::formatters;
use mstyle::types::{AnalyzeOptions, Severity};

/// Re-analyze and re-replay `content` under `config` until the rewritten
/// text stabilizes or `DEFAULT_FIX_PASSES` is reached. Returns the final
/// text together with the diagnostics from the very first pass (the ones a
/// user should see attributed to their original file).
fn converge_fix(
    file_path: &str,
    content: &str,
    config: &mstyle::config::Config,
    no_inline_config: bool,
) -> Result<(String, Vec<mstyle::types::Diagnostic>), Box<dyn std::error::Error>> {
    let mut current = content.to_string();
    let mut first_pass_diagnostics = None;

    for _pass in 0..DEFAULT_FIX_PASSES {
        let mut options = AnalyzeOptions::new()
            .with_string(file_path, current.clone())
            .with_config(config.clone());
        if no_inline_config {
            options = options.no_inline_config();
        }
        let results = engine::analyze(&options)?;
        let report = &results.reports[0];

        if first_pass_diagnostics.is_none() {
            first_pass_diagnostics = Some(report.diagnostics.clone());
        }

        match &report.rewritten {
            Some(next) if next != &current => current = next.clone(),
            _ => break,
        }
    }

    Ok((current, first_pass_diagnostics.unwrap_or_default()))
}

/// Analyze files once (used by watch mode and normal mode).
pub(crate) fn lint_files_once(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    use colored::Colorize;

    let files = expand_paths(&args.files);
    let files = filter_ignored(files, &args.ignore)?;

    if files.is_empty() {
        if !args.quiet {
            println!("No files to analyze.");
        }
        return Ok(());
    }

    let config = build_config(args)?;

    let mut options = AnalyzeOptions::new().with_config(config.clone());
    if args.no_inline_config {
        options = options.no_inline_config();
    }
    let options = files
        .iter()
        .fold(options, |opts, f| opts.with_file(f.clone()));

    let mut results = engine::analyze(&options)?;
    if args.no_style {
        for report in &mut results.reports {
            report.diagnostics.retain(|d| d.severity != Severity::Style);
        }
    }

    if args.fix_dry_run {
        let mut would_fix_count = 0;
        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            let (fixed, _) =
                converge_fix(file_path, &content, &config, args.no_inline_config)?;

            if fixed != content {
                would_fix_count += 1;
                if !args.quiet {
                    println!("{} {}", "Would fix:".yellow().bold(), file_path);
                    if let Some(report) = results.reports.iter().find(|r| &r.file == file_path) {
                        for d in report
                            .diagnostics
                            .iter()
                            .filter(|d| mstyle::types::find_rule(d.rule).is_some_and(|r| r.autofix))
                        {
                            println!("  line {}: {} {}", d.line, d.rule.yellow(), d.message);
                        }
                    }
                }
            }
        }

        if !args.quiet {
            if would_fix_count > 0 {
                println!(
                    "\n{} {} file(s) would be fixed (run with {} to apply).",
                    "»".yellow().bold(),
                    would_fix_count.to_string().yellow(),
                    "--fix".bold()
                );
            } else {
                println!("{}", "No fixable issues found.".dimmed());
            }
        }
        if would_fix_count > 0 {
            std::process::exit(1);
        }
        return Ok(());
    }

    if args.fix {
        let mut fixed_count = 0;
        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            let (fixed, _) =
                converge_fix(file_path, &content, &config, args.no_inline_config)?;

            if fixed != content {
                std::fs::write(file_path, &fixed)?;
                fixed_count += 1;
                if args.verbose || !args.quiet {
                    println!("{} {}", "Fixed:".green().bold(), file_path);
                }
            }
        }

        if !args.quiet {
            if fixed_count > 0 {
                println!(
                    "{} {} file(s) fixed.",
                    "✓".green().bold(),
                    fixed_count.to_string().green()
                );
            } else {
                println!("{}", "No fixable issues found.".dimmed());
            }
        }
    } else if results.is_empty() {
        if !args.quiet {
            println!("{} No issues found!", "✓".green().bold());
        }
    } else {
        if args.quiet {
            for file in results.files_with_diagnostics() {
                println!("{}", file);
            }
        } else {
            let output = match args.output_format {
                OutputFormat::Text => {
                    let mut sources = std::collections::HashMap::new();
                    for file in &files {
                        if let Ok(content) = std::fs::read_to_string(file) {
                            sources.insert(file.clone(), content);
                        }
                    }
                    let formatted = formatters::format_text_with_context(&results, &sources);
                    if args.verbose {
                        format!(
                            "{}\n\nSummary: {} diagnostic(s) in {} file(s)",
                            formatted,
                            results.total_diagnostics(),
                            results.reports.len()
                        )
                    } else {
                        formatted
                    }
                }
                OutputFormat::Json => formatters::format_json(&results),
                OutputFormat::Sarif => formatters::format_sarif(&results),
                OutputFormat::Github => formatters::format_github(&results),
            };
            println!("{}", output);
        }

        if args.watch {
            return Ok(());
        }
        std::process::exit(1);
    }

    Ok(())
}
