//! `mstyle init` subcommand — initialize a new configuration file

use super::wizard::init_config_interactive;

/// Initialize a new configuration file.
pub(crate) fn init_config(
    output_path: &str,
    format: &str,
    interactive: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use colored::Colorize;
    use std::path::Path;

    if Path::new(output_path).exists() {
        eprintln!(
            "{} Configuration file '{}' already exists.",
            "Error:".red().bold(),
            output_path
        );
        eprintln!("Remove it first or choose a different output path with --output");
        std::process::exit(1);
    }

    if interactive {
        return init_config_interactive(output_path, format);
    }

    let content = match format {
        "json" => r#"{
  "default": true,
  "line_length": 100,
  "tab_width": 4,
  "indentation": {
    "indent_width": 4
  },
  "copyright_entity": []
}"#
        .to_string(),
        "yaml" | "yml" => r#"# mstyle configuration
default: true

line_length: 100
tab_width: 4

indentation:
  indent_width: 4

copyright_entity: []
"#
        .to_string(),
        "toml" => r#"# mstyle configuration
default = true

line_length = 100
tab_width = 4

[indentation]
indent_width = 4

copyright_entity = []
"#
        .to_string(),
        _ => {
            eprintln!(
                "{} Unsupported format '{}'. Use json, yaml, or toml.",
                "Error:".red().bold(),
                format
            );
            std::process::exit(1);
        }
    };

    std::fs::write(output_path, content)?;

    println!(
        "{} Created configuration file: {}",
        "✓".green().bold(),
        output_path.cyan()
    );
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize rules", output_path.cyan());
    println!(
        "  2. Run: {} {} {}",
        "mstyle".cyan(),
        "--config".yellow(),
        output_path.cyan()
    );

    Ok(())
}
