use crate::core::ReportFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "hotel-reservations")]
#[command(about = "In-memory hotel reservation manager")]
pub struct CliConfig {
    /// TOML file with hotel name, registry policy and seed rooms/clients
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Default format offered by the export menu entry
    #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
    pub export_format: ReportFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("--config", &path.to_string_lossy())?;
        }
        Ok(())
    }
}
