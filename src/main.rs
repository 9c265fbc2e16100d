use clap::Parser;
use ridebook::adapter::inbound::cli::command::Cli;
use ridebook::adapter::inbound::cli::output::{self, OutputConfig};
use ridebook::adapter::inbound::cli::run;
use ridebook::infrastructure::config::settings::Config;
use tracing::debug;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let mut config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(1);
        }
    };
    if let Some(path) = &cli.snapshot {
        if let Err(e) = config.override_snapshot(path.display().to_string()) {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    }

    config.init_logging(cli.verbose);
    debug!(config = %cli.config.display(), snapshot = %config.store.snapshot, "ridebook starting");

    if let Err(e) = run::execute(&cli, &config) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
