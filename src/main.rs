//! Command-line interface for mstyle

#[cfg(feature = "cli")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    mstyle::cli::run()
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
