use clap::Parser;
use risk_engine::cli::{Cli, Commands};
use risk_engine::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    risk_engine::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Forex(args) => args.execute(&config)?,
        Commands::Crypto(args) => args.execute(&config)?,
        Commands::Options(args) => args.execute(&config)?,
        Commands::Futures(args) => args.execute(&config)?,
        Commands::Kelly(args) => args.execute(&config)?,
        Commands::Sharpe(args) => args.execute(&config)?,
        Commands::FixedRatio(args) => args.execute(&config)?,
        Commands::AtrSize(args) => args.execute(&config)?,
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Account: {} {} at {}% risk",
                config.account.balance, config.account.currency, config.account.risk_percentage
            );
            println!(
                "  Forex: {} units/lot, step {}",
                config.forex.contract_units, config.forex.lot_step
            );
            println!(
                "  Crypto: mmr {}, funding every {}h",
                config.crypto.default_maintenance_margin_rate, config.crypto.funding_interval_hours
            );
            println!(
                "  Options: {} shares/contract, r={}, ATM band {}",
                config.options.contract_size, config.options.risk_free_rate, config.options.atm_band
            );
            println!("  Futures: tick {}", config.futures.default_tick_size);
            println!(
                "  Telemetry: {} ({:?})",
                config.telemetry.log_level, config.telemetry.log_format
            );
        }
    }

    Ok(())
}
