//! Interactive configuration wizard

/// Config options collected from wizard.
pub(crate) struct ConfigOptions {
    pub(crate) line_length: usize,
    pub(crate) tab_width: usize,
    pub(crate) indent_width: usize,
    pub(crate) octave: bool,
    pub(crate) copyright_entity: Vec<String>,
    pub(crate) disabled_rules: Vec<&'static str>,
}

/// Generate configuration content based on wizard answers.
pub(crate) fn generate_config(format: &str, options: &ConfigOptions) -> String {
    match format {
        "json" => generate_json_config(options),
        "yaml" => generate_yaml_config(options),
        "toml" => generate_toml_config(options),
        _ => String::new(),
    }
}

pub(crate) fn generate_json_config(options: &ConfigOptions) -> String {
    let mut config = String::from("{\n  \"default\": true");

    for rule in &options.disabled_rules {
        config.push_str(&format!(",\n  \"{}\": false", rule));
    }

    config.push_str(&format!(",\n  \"line_length\": {}", options.line_length));
    config.push_str(&format!(",\n  \"tab_width\": {}", options.tab_width));
    config.push_str(&format!(
        ",\n  \"indentation\": {{\n    \"indent_width\": {}\n  }}",
        options.indent_width
    ));

    if options.octave {
        config.push_str(",\n  \"octave\": true");
    }

    if !options.copyright_entity.is_empty() {
        let entities = options
            .copyright_entity
            .iter()
            .map(|e| format!("\"{}\"", e))
            .collect::<Vec<_>>()
            .join(", ");
        config.push_str(&format!(",\n  \"copyright_entity\": [{}]", entities));
    }

    config.push_str("\n}\n");
    config
}

pub(crate) fn generate_yaml_config(options: &ConfigOptions) -> String {
    let mut config = String::from("# mstyle configuration\ndefault: true\n");

    for rule in &options.disabled_rules {
        config.push_str(&format!("{}: false\n", rule));
    }

    config.push_str(&format!("line_length: {}\n", options.line_length));
    config.push_str(&format!("tab_width: {}\n", options.tab_width));
    config.push_str(&format!(
        "\nindentation:\n  indent_width: {}\n",
        options.indent_width
    ));

    if options.octave {
        config.push_str("\noctave: true\n");
    }

    if !options.copyright_entity.is_empty() {
        config.push_str("\ncopyright_entity:\n");
        for entity in &options.copyright_entity {
            config.push_str(&format!("  - {}\n", entity));
        }
    }

    config
}

pub(crate) fn generate_toml_config(options: &ConfigOptions) -> String {
    let mut config = String::from("# mstyle configuration\ndefault = true\n");

    for rule in &options.disabled_rules {
        config.push_str(&format!("{} = false\n", rule));
    }

    config.push_str(&format!("line_length = {}\n", options.line_length));
    config.push_str(&format!("tab_width = {}\n", options.tab_width));
    config.push_str(&format!(
        "\n[indentation]\nindent_width = {}\n",
        options.indent_width
    ));

    if options.octave {
        config.push_str("\noctave = true\n");
    }

    if !options.copyright_entity.is_empty() {
        let entities = options
            .copyright_entity
            .iter()
            .map(|e| format!("\"{}\"", e))
            .collect::<Vec<_>>()
            .join(", ");
        config.push_str(&format!("\ncopyright_entity = [{}]\n", entities));
    }

    config
}

/// Interactive configuration wizard.
pub(crate) fn init_config_interactive(
    output_path: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    use colored::Colorize;
    use dialoguer::{Confirm, Input, MultiSelect, Select};

    println!("{}", "mstyle Configuration Wizard".cyan().bold());
    println!();
    println!("This wizard will help you create a custom configuration file.");
    println!();

    let formats = vec!["JSON", "YAML", "TOML"];
    let default_format_idx = match format {
        "yaml" | "yml" => 1,
        "toml" => 2,
        _ => 0,
    };
    let format_idx = Select::new()
        .with_prompt("What format would you like for your config file?")
        .items(&formats)
        .default(default_format_idx)
        .interact()?;
    let selected_format = match format_idx {
        1 => "yaml",
        2 => "toml",
        _ => "json",
    };

    let line_length: usize = Input::new()
        .with_prompt("Maximum line length")
        .default(100)
        .interact()?;

    let tab_width: usize = Input::new()
        .with_prompt("Tab width (spaces per tab)")
        .default(4)
        .interact()?;

    let indent_width: usize = Input::new()
        .with_prompt("Indentation width (spaces per block level)")
        .default(4)
        .interact()?;

    let octave = Confirm::new()
        .with_prompt("Enable the Octave dialect (# line comments, relaxed keywords)?")
        .default(false)
        .interact()?;

    let wants_copyright = Confirm::new()
        .with_prompt("Require a copyright header?")
        .default(false)
        .interact()?;

    let copyright_entity: Vec<String> = if wants_copyright {
        let entity: String = Input::new()
            .with_prompt("Accepted copyright holder name")
            .interact_text()?;
        vec![entity]
    } else {
        vec![]
    };

    let optional_rules: Vec<&'static str> = vec!["indentation", "copyright_notice"];
    let disabled_selection = MultiSelect::new()
        .with_prompt("Which optional rules would you like to disable? (optional)")
        .items(&optional_rules)
        .interact()?;
    let disabled_rules: Vec<&'static str> = disabled_selection
        .iter()
        .map(|&idx| optional_rules[idx])
        .collect();

    println!();
    println!("{}", "Generating configuration...".green());

    let options = ConfigOptions {
        line_length,
        tab_width,
        indent_width,
        octave,
        copyright_entity,
        disabled_rules,
    };

    let content = generate_config(selected_format, &options);

    let output_path = if selected_format != format {
        match selected_format {
            "yaml" => output_path
                .replace(".json", ".yaml")
                .replace(".toml", ".yaml"),
            "toml" => output_path
                .replace(".json", ".toml")
                .replace(".yaml", ".toml"),
            _ => output_path
                .replace(".yaml", ".json")
                .replace(".toml", ".json"),
        }
    } else {
        output_path.to_string()
    };

    std::fs::write(&output_path, content)?;

    println!();
    println!(
        "{} Created configuration file: {}",
        "✓".green().bold(),
        output_path.cyan()
    );
    println!();
    println!("Next steps:");
    println!(
        "  1. Review and edit {} to fine-tune rules",
        output_path.cyan()
    );
    println!(
        "  2. Run: {} {} {}",
        "mstyle".cyan(),
        "--config".yellow(),
        output_path.yellow()
    );
    println!(
        "  3. Auto-fix issues: {} {} {} {}",
        "mstyle".cyan(),
        "--fix".yellow(),
        "--config".yellow(),
        output_path.yellow()
    );

    Ok(())
}
