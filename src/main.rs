use anyhow::Context;
use clap::Parser;
use hotel_reservations::domain::SystemClock;
use hotel_reservations::utils::{logger, validation::Validate};
use hotel_reservations::{CliConfig, Console, HotelConfig};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(logger::LogFormat::from_json_flag(cli.log_json), cli.verbose);

    tracing::info!("Starting hotel-reservations");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate() {
        tracing::error!("Invalid command line: {}", e);
        eprintln!("ERROR: {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let hotel_config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            HotelConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path.display()))?
        }
        None => HotelConfig::default(),
    };

    if let Err(e) = hotel_config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("ERROR: {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut manager = hotel_config
        .build_manager(SystemClock)
        .context("failed to register the configured rooms and clients")?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock())
        .with_hotel_name(hotel_config.hotel_name())
        .with_export_format(cli.export_format);

    console.run(&mut manager).context("console I/O failed")?;

    tracing::info!(
        "Session ended with {} reservation(s) recorded",
        manager.reservations().len()
    );
    Ok(())
}
