use anyhow::Result;
use duke::cli;
use duke::config::Config;
use duke::context::{AppContext, StandardContext};
use duke::controller::Session;
use duke::storage::{LocalStorage, TaskStorage};
use std::env;
use std::io;

fn main() -> Result<()> {
    let mut args = env::args();
    let binary_name = args.next().unwrap_or_else(|| "duke".to_string());

    let cli_args = match cli::parse_args(args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("Run '{} --help' for usage.", binary_name);
            std::process::exit(2);
        }
    };
    if cli_args.help {
        cli::print_help(&binary_name);
        return Ok(());
    }

    let ctx = StandardContext::new(cli_args.root);

    let config = match Config::load(&ctx) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration:\n{:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::init_logging(&ctx, config.log_level_filter()) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    // First start: write the defaults so the settings are easy to find.
    let config_path = ctx.get_config_file_path()?;
    if !config_path.exists() {
        match config.save(&ctx) {
            Ok(()) => log::info!("Wrote default config to {:?}", config_path),
            Err(e) => log::warn!("Could not write default config: {:#}", e),
        }
    }

    let storage = LocalStorage::from_context(&ctx, &config)?;
    log::info!("Using task file {:?}", storage.path());

    // CLI Command: duke export
    if cli_args.export {
        for record in storage.load()? {
            println!("{}", record);
        }
        return Ok(());
    }

    let (session, opening) = Session::start(Box::new(storage), config);
    cli::run_chat(session, &opening, io::stdin().lock(), io::stdout().lock())
}
