use anyhow::Result;
use clap::Parser;
use font_registry::cli::{self, Cli};
use font_registry::debug;

fn main() -> Result<()> {
    // Parse CLI arguments first so --log-level applies to config loading
    let cli = Cli::parse();
    debug::init_log_bridge(cli.log_level, cli.log_file.as_deref());

    log::info!("Starting font-registry");

    let config = cli::load_config(&cli)?;
    debug::apply_config_level(config.log_level);

    let mut stdout = std::io::stdout().lock();
    let code = cli::run(&cli, &config, &mut stdout)?;

    if code != 0 {
        // No destructors with side effects are pending at this point.
        std::process::exit(code);
    }
    Ok(())
}
