use crate::core::manager::ReservationManager;
use crate::domain::Clock;
use crate::utils::error::{HotelError, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Tsv => "tsv",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "tsv" => Ok(ReportFormat::Tsv),
            "json" => Ok(ReportFormat::Json),
            other => Err(HotelError::invalid_input(
                "format",
                other,
                "expected csv, tsv or json",
            )),
        }
    }
}

/// One reservation with the client and room names it was booked under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub id: u32,
    pub client: String,
    pub room: String,
    pub status: String,
    pub check_in: String,
    pub check_out: Option<String>,
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Client: {}, Room: {}, Status: {}, Check-in: {}, Check-out: {}",
            self.id,
            self.client,
            self.room,
            self.status,
            self.check_in,
            self.check_out.as_deref().unwrap_or("N/A")
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReservationReport {
    pub rows: Vec<ReportRow>,
}

impl ReservationReport {
    pub fn from_manager<C: Clock>(manager: &ReservationManager<C>) -> Self {
        let rows = manager
            .reservations()
            .iter()
            .map(|r| ReportRow {
                id: r.id().0,
                client: r.client_name().to_string(),
                room: r.room_name().to_string(),
                status: r.status().to_string(),
                check_in: r.check_in_display(),
                check_out: r.check_out_display(),
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Csv => self.render_delimited(b','),
            ReportFormat::Tsv => self.render_delimited(b'\t'),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(&self.rows)?),
        }
    }

    fn render_delimited(&self, delimiter: u8) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(["id", "client", "room", "status", "check_in", "check_out"])?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| HotelError::IoError(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Writes the rendered report, creating missing parent directories.
    pub fn export<P: AsRef<Path>>(&self, path: P, format: ReportFormat) -> Result<PathBuf> {
        let path = path.as_ref();
        let content = self.render(format)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;

        tracing::info!(
            "Exported {} reservation(s) as {} to {}",
            self.rows.len(),
            format,
            path.display()
        );
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Client, ClientId, FixedClock, ReservationId, Room, RoomId};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn manager_with_history() -> ReservationManager<FixedClock> {
        let clock = FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 15, 0)
                .unwrap(),
        );
        let mut manager = ReservationManager::new(clock);
        manager.add_room(Room::new(1, "Suite", dec!(200.0))).unwrap();
        manager.add_room(Room::new(2, "Single", dec!(90))).unwrap();
        manager.add_client(Client::new(1, "Ana", "111", 30)).unwrap();
        manager.add_client(Client::new(2, "Bruno", "222", 41)).unwrap();
        manager.make_reservation(ClientId(1), RoomId(1)).unwrap();
        manager.make_reservation(ClientId(2), RoomId(2)).unwrap();
        manager.end_reservation(ReservationId(1)).unwrap();
        manager
    }

    #[test]
    fn test_csv_report() {
        let report = ReservationReport::from_manager(&manager_with_history());
        let csv = report.render(ReportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "id,client,room,status,check_in,check_out");
        assert_eq!(lines[1], "1,Ana,Suite,Closed,2024-05-01,2024-05-01 09:15:00");
        assert_eq!(lines[2], "2,Bruno,Single,Active,2024-05-01,");
    }

    #[test]
    fn test_tsv_report_uses_tabs() {
        let report = ReservationReport::from_manager(&manager_with_history());
        let tsv = report.render(ReportFormat::Tsv).unwrap();
        assert!(tsv.starts_with("id\tclient\troom\tstatus\tcheck_in\tcheck_out"));
    }

    #[test]
    fn test_json_report() {
        let report = ReservationReport::from_manager(&manager_with_history());
        let json = report.render(ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["status"], "Closed");
        assert_eq!(value[1]["check_out"], serde_json::Value::Null);
    }

    #[test]
    fn test_report_keeps_names_after_ids_are_reused() {
        let mut manager = manager_with_history();
        manager.remove_room(RoomId(1)).unwrap();
        manager.remove_client(ClientId(1)).unwrap();
        manager.add_room(Room::new(1, "Attic", dec!(40))).unwrap();
        manager.add_client(Client::new(1, "Bia", "333", 25)).unwrap();

        let report = ReservationReport::from_manager(&manager);
        assert_eq!(report.rows[0].client, "Ana");
        assert_eq!(report.rows[0].room, "Suite");
        let csv = report.render(ReportFormat::Csv).unwrap();
        assert!(!csv.contains("Bia"));
        assert!(!csv.contains("Attic"));
    }

    #[test]
    fn test_row_display() {
        let report = ReservationReport::from_manager(&manager_with_history());
        assert_eq!(
            report.rows[1].to_string(),
            "ID: 2, Client: Bruno, Room: Single, Status: Active, Check-in: 2024-05-01, Check-out: N/A"
        );
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("xml".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_export_creates_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports/nested/reservations.csv");
        let report = ReservationReport::from_manager(&manager_with_history());
        let written = report.export(&path, ReportFormat::Csv).unwrap();
        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Bruno"));
    }
}
