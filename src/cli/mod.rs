//! CLI entry point — module declarations and the `run()` dispatcher

mod args;
mod config_build;
mod files;
mod init;
mod lint;
mod rules;
mod schema;
mod watch;
mod wizard;

use args::{Args, Command};
use clap::Parser;
use config_build::build_config;
use files::{expand_paths, filter_ignored};

/// Main CLI entry point — parse args and dispatch to the appropriate handler.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Some(Command::Init {
        output,
        format,
        interactive,
    }) = args.command
    {
        return init::init_config(&output, &format, interactive);
    }

    if args.generate_schema {
        print!("{}", schema::generate_config_schema());
        return Ok(());
    }

    if args.list_presets {
        rules::list_presets();
        return Ok(());
    }

    if args.list_rules {
        rules::list_rules(&args.preset);
        return Ok(());
    }

    if let Some(ref rule_name) = args.explain {
        rules::explain_rule(rule_name);
        return Ok(());
    }

    if let Some(ref path) = args.debug_dump_tree {
        return debug_dump_tree(path);
    }

    if args.debug_validate_links {
        return debug_validate_links(&args);
    }

    if args.files.is_empty() && !args.stdin {
        eprintln!("error: FILES argument required (or use --stdin)");
        std::process::exit(1);
    }

    if args.watch && args.stdin {
        eprintln!("error: --watch cannot be used with --stdin");
        std::process::exit(1);
    }

    if args.watch {
        return watch::run_watch_mode(&args);
    }

    if args.stdin {
        return run_stdin(&args);
    }

    lint::lint_files_once(&args)
}

/// Handle `--stdin`: analyze stdin content as a single in-memory source.
fn run_stdin(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    use mstyle::engine;
    use mstyle::types::AnalyzeOptions;

    let content = std::io::read_to_string(std::io::stdin())?;
    let stdin_key = args
        .stdin_filename
        .clone()
        .unwrap_or_else(|| "-".to_string());

    let config = build_config(args)?;
    let mut options = AnalyzeOptions::new()
        .with_string(stdin_key.clone(), content)
        .with_config(config);
    if args.no_inline_config {
        options = options.no_inline_config();
    }

    let results = engine::analyze(&options)?;
    let report = &results.reports[0];

    if args.fix || args.fix_dry_run {
        if let Some(rewritten) = &report.rewritten {
            print!("{}", rewritten);
        } else {
            print!("{}", options_content(&options, &stdin_key));
        }
        return Ok(());
    }

    if report.is_empty() {
        if !args.quiet {
            println!("No issues found!");
        }
    } else {
        let output = mstyle::formatters::format_text(&results);
        println!("{}", output);
        std::process::exit(1);
    }

    Ok(())
}

fn options_content(options: &mstyle::types::AnalyzeOptions, key: &str) -> String {
    options.strings.get(key).cloned().unwrap_or_default()
}

/// `--debug-dump-tree FILE`: print the parsed block-structure tree to
/// stderr for inspection.
fn debug_dump_tree(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    use mstyle::lexer::{self, LexOptions};
    use mstyle::parser;

    let content = std::fs::read_to_string(path)?;
    let mut tokens = lexer::lex(path, &content, &LexOptions::default())?;
    let parsed = parser::parse(&mut tokens)?;

    for (idx, node) in parsed.nodes.iter().enumerate() {
        eprintln!(
            "[{idx}] {} (indent={}, causes_indentation={})",
            node.kind,
            node.get_indentation(),
            node.causes_indentation()
        );
    }

    Ok(())
}

/// `--debug-validate-links`: confirm every token's `ast_link` resolves to a
/// live node in the parser's arena, for every given file.
fn debug_validate_links(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    use mstyle::lexer::{self, LexOptions};
    use mstyle::parser;

    let files = expand_paths(&args.files);
    let files = filter_ignored(files, &args.ignore)?;

    let mut bad = 0;
    for file in &files {
        let content = std::fs::read_to_string(file)?;
        let mut tokens = lexer::lex(file, &content, &LexOptions::default())?;
        let parsed = parser::parse(&mut tokens)?;

        for (i, token) in tokens.iter().enumerate() {
            if let Some(idx) = token.ast_link
                && parsed.nodes.get(idx).is_none()
            {
                eprintln!("{file}: token {i} has dangling ast_link {idx}");
                bad += 1;
            }
        }
    }

    if bad > 0 {
        eprintln!("{bad} dangling link(s) found");
        std::process::exit(1);
    }
    println!("All ast_link indices resolve.");
    Ok(())
}
