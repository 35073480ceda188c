//! Translate CLI flags into an effective `Config`

use super::args::Args;
use mstyle::config::{Config, RuleConfig};

/// Build the effective configuration: config file (or default) with
/// `--enable`/`--disable`/`--preset` and rule-parameter flags applied on
/// top, then extends/preset resolved.
pub(crate) fn build_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if let Some(ref config_path) = args.config {
        Config::from_file(config_path)?
    } else {
        Config::discover(std::env::current_dir()?).unwrap_or_default()
    };

    for rule in &args.enable {
        config.rules.insert(rule.clone(), RuleConfig::Enabled(true));
    }
    for rule in &args.disable {
        config
            .rules
            .insert(rule.clone(), RuleConfig::Enabled(false));
    }

    if let Some(ref preset_name) = args.preset {
        config.preset = Some(preset_name.clone());
    }

    if !args.copyright_entity.is_empty() {
        config.copyright_entity = args.copyright_entity.clone();
    }
    if let Some(limit) = args.file_length {
        config.file_length = limit;
    }
    if let Some(limit) = args.line_length {
        config.line_length = limit;
    }
    if let Some(width) = args.tab_width {
        config.tab_width = width;
    }
    if args.octave {
        config.octave = true;
    }
    if args.ignore_pragmas {
        config.ignore_pragmas = true;
    }

    Ok(config.resolve_extends()?)
}
