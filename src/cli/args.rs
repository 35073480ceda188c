//! CLI argument definitions for mstyle

use clap::Parser;

#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif,
    /// GitHub Actions workflow command annotations (::error file=...)
    Github,
}

#[derive(Parser, Debug)]
#[command(name = "mstyle")]
#[command(about = "A style checker and auto-formatter for .m source files", long_about = None)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub(crate) command: Option<Command>,

    /// Files or directories to analyze
    #[arg(global = true)]
    pub(crate) files: Vec<String>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub(crate) config: Option<String>,

    /// Output format
    #[arg(short = 'o', long, default_value = "text", global = true)]
    pub(crate) output_format: OutputFormat,

    /// Glob patterns for files to ignore (repeatable)
    #[arg(long, action = clap::ArgAction::Append, global = true)]
    pub(crate) ignore: Vec<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Disable `mh:ignore_style` justification-marker suppression
    #[arg(long, global = true)]
    pub(crate) no_inline_config: bool,

    /// Automatically fix violations where possible
    #[arg(short, long, global = true)]
    pub(crate) fix: bool,

    /// Show what --fix would change without writing any files
    #[arg(long, global = true)]
    pub(crate) fix_dry_run: bool,

    /// List all available rules
    #[arg(long, global = true)]
    pub(crate) list_rules: bool,

    /// List all available presets
    #[arg(long, global = true)]
    pub(crate) list_presets: bool,

    /// Read input from stdin (use '-' as filename)
    #[arg(long, global = true)]
    pub(crate) stdin: bool,

    /// Enable specific rules (can be repeated)
    #[arg(long, action = clap::ArgAction::Append, global = true)]
    pub(crate) enable: Vec<String>,

    /// Disable specific rules (can be repeated)
    #[arg(long, action = clap::ArgAction::Append, global = true)]
    pub(crate) disable: Vec<String>,

    /// Verbose output with detailed information
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// Quiet mode - only show file names with diagnostics
    #[arg(short, long, global = true)]
    pub(crate) quiet: bool,

    /// Apply a named rule preset (e.g., "octave", "strict")
    #[arg(long, global = true)]
    pub(crate) preset: Option<String>,

    /// Watch mode - re-analyze files on changes
    #[arg(short, long, global = true)]
    pub(crate) watch: bool,

    /// Watch specific paths (default: all input files/directories)
    #[arg(long, action = clap::ArgAction::Append, global = true)]
    pub(crate) watch_paths: Vec<String>,

    /// Print the JSON Schema for the configuration file to stdout
    #[arg(long, global = true)]
    pub(crate) generate_schema: bool,

    /// Filename to use for stdin content in diagnostic output
    #[arg(long, global = true)]
    pub(crate) stdin_filename: Option<String>,

    /// Accepted copyright holder names/aliases (repeatable)
    #[arg(long, action = clap::ArgAction::Append, global = true)]
    pub(crate) copyright_entity: Vec<String>,

    /// Maximum number of physical lines per file
    #[arg(long, global = true)]
    pub(crate) file_length: Option<usize>,

    /// Maximum number of characters per physical line
    #[arg(long, global = true)]
    pub(crate) line_length: Option<usize>,

    /// Number of spaces a tab expands to
    #[arg(long, global = true)]
    pub(crate) tab_width: Option<usize>,

    /// Enable the Octave dialect
    #[arg(long, global = true)]
    pub(crate) octave: bool,

    /// Ignore `%#...` in-code pragma annotations when checking comment hygiene
    #[arg(long, global = true)]
    pub(crate) ignore_pragmas: bool,

    /// Suppress Style-severity diagnostics at output time
    #[arg(long, global = true)]
    pub(crate) no_style: bool,

    /// Dump the parsed block-structure tree for a single file to stderr
    #[arg(long, global = true)]
    pub(crate) debug_dump_tree: Option<String>,

    /// Validate that every token's `ast_link` resolves to a live AST node
    #[arg(long, global = true)]
    pub(crate) debug_validate_links: bool,

    /// Print a rule's full descriptor (name, description, parameters,
    /// mandatory, autofix) and exit
    #[arg(long, global = true)]
    pub(crate) explain: Option<String>,
}

#[derive(Parser, Debug)]
pub(crate) enum Command {
    /// Initialize a new configuration file
    Init {
        /// Output file path (default: .mstyle.json)
        #[arg(long, default_value = ".mstyle.json")]
        output: String,

        /// Output format (json, yaml, or toml)
        #[arg(long, default_value = "json")]
        format: String,

        /// Interactive mode with guided questions
        #[arg(long, short)]
        interactive: bool,
    },
}
