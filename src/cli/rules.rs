//! `--list-rules`, `--list-presets`, and `--explain` handlers

use mstyle::config::presets::{preset_names, resolve_preset};
use mstyle::types::RULE_TABLE;

/// List all available rules, optionally annotated by a preset.
pub(crate) fn list_rules(preset: &Option<String>) {
    use colored::Colorize;

    let preset_config = preset.as_deref().and_then(resolve_preset);

    if let Some(p) = preset {
        println!(
            "{}",
            format!("Available Rules (preset: {p})").bold().underline()
        );
    } else {
        println!("{}", "Available Rules".bold().underline());
    }
    println!();

    println!(
        "{:24} {:10} {:10} {}",
        "Rule".bold(),
        "Mandatory".bold(),
        "Autofix".bold(),
        "Description".bold()
    );
    println!("{}", "─".repeat(90));

    for rule in RULE_TABLE {
        let mandatory = if rule.mandatory { "✓" } else { " " };
        let autofix = if rule.autofix { "✓" } else { " " };
        let name_display = if rule.mandatory {
            rule.name.cyan()
        } else {
            rule.name.normal()
        };

        let preset_mark = preset_config.as_ref().map(|cfg| {
            if cfg.is_rule_enabled(rule.name) {
                " ●".green()
            } else {
                " ○".red()
            }
        });

        print!(
            "{:24} {:^10} {:^10} {}",
            name_display, mandatory, autofix, rule.description
        );
        if let Some(mark) = preset_mark {
            println!("{}", mark);
        } else {
            println!();
        }
    }

    println!();
    let total = RULE_TABLE.len();
    let mandatory_count = RULE_TABLE.iter().filter(|r| r.mandatory).count();
    let autofix_count = RULE_TABLE.iter().filter(|r| r.autofix).count();
    println!(
        "Total: {total} rules ({mandatory_count} mandatory, {autofix_count} autofixable)"
    );
}

/// List all available named presets.
pub(crate) fn list_presets() {
    use colored::Colorize;

    println!("{}", "Available Presets".bold().underline());
    println!();

    for name in preset_names() {
        let Some(config) = resolve_preset(name) else {
            continue;
        };

        let enabled: Vec<&str> = RULE_TABLE
            .iter()
            .filter(|r| !r.mandatory && config.is_rule_enabled(r.name))
            .map(|r| r.name)
            .collect();

        println!("  {}", name.cyan().bold());
        if config.octave {
            println!("    {} Octave dialect enabled", "Mode:".yellow());
        }
        if !enabled.is_empty() {
            println!("    {} {}", "Enables:".green(), enabled.join(", "));
        }
        println!();
    }

    println!("Use {} to apply a preset.", "--preset <name>".yellow());
}

/// `--explain RULE`: print a rule's full descriptor.
pub(crate) fn explain_rule(name: &str) {
    match mstyle::types::find_rule(name) {
        Some(rule) => {
            println!("{}", rule.name);
            println!("  description: {}", rule.description);
            println!("  scope:       {:?}", rule.scope);
            println!("  mandatory:   {}", rule.mandatory);
            println!("  autofix:     {}", rule.autofix);
            if !rule.parameters.is_empty() {
                println!("  parameters:");
                for param in rule.parameters {
                    println!("    {} = {:?}", param.name, param.default);
                }
            }
        }
        None => {
            eprintln!("error: unknown rule '{name}'");
            std::process::exit(1);
        }
    }
}
