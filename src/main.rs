use clap::{ArgAction, Parser};

use snipmark::config::Config;

#[derive(Parser, Debug)]
#[command(name = "snipmark")]
#[command(version, about = "Screenshot capture and annotation engine")]
struct Cli {
    /// Validate the configuration file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    check_config: bool,

    /// Print the configuration file path and exit
    #[arg(long, action = ArgAction::SetTrue)]
    config_path: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.config_path {
        println!("{}", Config::get_config_path()?.display());
        return Ok(());
    }

    if cli.check_config {
        let config = Config::load()?;
        println!("Configuration OK");
        println!(
            "  default tool: {}, thickness {:.1}",
            config.default_tool().name(),
            config.drawing.default_thickness
        );
        println!(
            "  output: {} ({})",
            config.output.filename_template, config.output.format
        );
        return Ok(());
    }

    // No flags: this crate is the engine; a host provides the event loop.
    println!("snipmark: screenshot capture and annotation engine");
    println!();
    println!("Usage:");
    println!("  snipmark --check-config    Validate ~/.config/snipmark/config.toml");
    println!("  snipmark --config-path     Print the configuration file path");
    println!("  snipmark --help            Show help");
    println!();
    println!("This binary only exposes configuration tooling. The capture,");
    println!("annotation, and export engine lives in the snipmark library and");
    println!("is driven by a host application's event loop.");

    Ok(())
}
