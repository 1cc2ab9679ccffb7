use crate::app::forms::{
    parse_client_id, parse_reservation_id, parse_room_id, ClientForm, RoomForm,
};
use crate::config::toml_config::DEFAULT_HOTEL_NAME;
use crate::core::{ReportFormat, ReservationManager, ReservationReport};
use crate::domain::{Client, Clock, Room};
use crate::utils::error::{HotelError, Result};
use crate::utils::validation::validate_path;
use std::io::{BufRead, Write};

/// Whether the menu loop keeps going after a screen returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Line-oriented front desk. Reads choices and form fields from `input`
/// and writes menus, listings and `OK:`/`ERROR:` messages to `output`.
pub struct Console<R, W> {
    input: R,
    output: W,
    hotel_name: String,
    export_format: ReportFormat,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hotel_name: DEFAULT_HOTEL_NAME.to_string(),
            export_format: ReportFormat::default(),
        }
    }

    pub fn with_hotel_name(mut self, name: impl Into<String>) -> Self {
        self.hotel_name = name.into();
        self
    }

    pub fn with_export_format(mut self, format: ReportFormat) -> Self {
        self.export_format = format;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until `0` is chosen or input ends. Only failures to read or
    /// write the console itself are returned as errors.
    pub fn run<C: Clock>(&mut self, manager: &mut ReservationManager<C>) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };
            tracing::debug!("Menu choice: {}", choice);

            let flow = match choice.as_str() {
                "1" => self.show_available_rooms(manager)?,
                "2" => self.show_reserved_rooms(manager)?,
                "3" => self.make_reservation(manager)?,
                "4" => self.end_reservation(manager)?,
                "5" => self.manage_clients(manager)?,
                "6" => self.manage_rooms(manager)?,
                "7" => self.show_reservations(manager)?,
                "8" => self.export_reservations(manager)?,
                "0" => Flow::Exit,
                other => {
                    self.error_line(&format!("Unknown option '{}'.", other))?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }
        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "== {} ==", self.hotel_name)?;
        writeln!(self.output, "1 - Available rooms")?;
        writeln!(self.output, "2 - Reserved rooms")?;
        writeln!(self.output, "3 - Make a reservation")?;
        writeln!(self.output, "4 - End a reservation")?;
        writeln!(self.output, "5 - Manage clients")?;
        writeln!(self.output, "6 - Manage rooms")?;
        writeln!(self.output, "7 - List reservations")?;
        writeln!(self.output, "8 - Export reservations")?;
        writeln!(self.output, "0 - Exit")?;
        Ok(())
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ok_line(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "OK: {}", message)?;
        Ok(())
    }

    fn error_line(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "ERROR: {}", message)?;
        Ok(())
    }

    fn report_failure(&mut self, error: &HotelError) -> Result<()> {
        tracing::debug!("Operation failed ({:?}): {}", error.category(), error);
        self.error_line(&error.user_friendly_message())
    }

    fn show_available_rooms<C: Clock>(
        &mut self,
        manager: &ReservationManager<C>,
    ) -> Result<Flow> {
        writeln!(self.output, "Available rooms:")?;
        let rooms = manager.available_rooms();
        if rooms.is_empty() {
            writeln!(self.output, "No rooms available.")?;
        }
        for room in rooms {
            writeln!(self.output, "{}", room_line(room))?;
        }
        Ok(Flow::Continue)
    }

    fn show_reserved_rooms<C: Clock>(&mut self, manager: &ReservationManager<C>) -> Result<Flow> {
        writeln!(self.output, "Reserved rooms:")?;
        let rooms = manager.reserved_rooms();
        if rooms.is_empty() {
            writeln!(self.output, "No rooms reserved.")?;
        }
        for room in rooms {
            writeln!(self.output, "{}", room_line(room))?;
        }
        Ok(Flow::Continue)
    }

    fn make_reservation<C: Clock>(&mut self, manager: &mut ReservationManager<C>) -> Result<Flow> {
        let Some(client_raw) = self.prompt("Client id: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(room_raw) = self.prompt("Room id: ")? else {
            return Ok(Flow::Exit);
        };

        let ids = parse_client_id(&client_raw)
            .and_then(|client_id| parse_room_id(&room_raw).map(|room_id| (client_id, room_id)));
        let (client_id, room_id) = match ids {
            Ok(ids) => ids,
            Err(e) => {
                self.report_failure(&e)?;
                return Ok(Flow::Continue);
            }
        };

        match manager.make_reservation(client_id, room_id) {
            Ok(reservation) => {
                let message = format!(
                    "Reservation {} created (check-in {}).",
                    reservation.id(),
                    reservation.check_in_display()
                );
                self.ok_line(&message)?;
            }
            Err(e) => self.report_failure(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn end_reservation<C: Clock>(&mut self, manager: &mut ReservationManager<C>) -> Result<Flow> {
        let Some(raw) = self.prompt("Reservation id: ")? else {
            return Ok(Flow::Exit);
        };

        let outcome =
            parse_reservation_id(&raw).and_then(|id| manager.end_reservation(id).cloned());
        match outcome {
            Ok(reservation) => {
                let message = format!(
                    "Reservation {} closed at {}.",
                    reservation.id(),
                    reservation.check_out_display().unwrap_or_default()
                );
                self.ok_line(&message)?;
            }
            Err(e) => self.report_failure(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn show_reservations<C: Clock>(&mut self, manager: &ReservationManager<C>) -> Result<Flow> {
        writeln!(self.output, "Reservations:")?;
        let report = ReservationReport::from_manager(manager);
        if report.is_empty() {
            writeln!(self.output, "No reservations found.")?;
        }
        for row in &report.rows {
            writeln!(self.output, "{}", row)?;
        }
        Ok(Flow::Continue)
    }

    fn list_clients<C: Clock>(&mut self, manager: &ReservationManager<C>) -> Result<()> {
        writeln!(self.output, "Clients:")?;
        if manager.clients().is_empty() {
            writeln!(self.output, "No clients registered.")?;
        }
        for client in manager.clients() {
            writeln!(self.output, "{}", client_line(client))?;
        }
        Ok(())
    }

    fn manage_clients<C: Clock>(&mut self, manager: &mut ReservationManager<C>) -> Result<Flow> {
        self.list_clients(manager)?;
        loop {
            let Some(action) = self.prompt("[a]dd, [r]emove, [l]ist, [b]ack: ")? else {
                return Ok(Flow::Exit);
            };
            match action.to_ascii_lowercase().as_str() {
                "a" => {
                    let mut form = ClientForm::default();
                    for (label, slot) in [
                        ("Client id: ", &mut form.id),
                        ("Name: ", &mut form.name),
                        ("National id: ", &mut form.national_id),
                        ("Age: ", &mut form.age),
                    ] {
                        let Some(value) = self.prompt(label)? else {
                            return Ok(Flow::Exit);
                        };
                        *slot = value;
                    }
                    match form.into_client().and_then(|c| manager.add_client(c)) {
                        Ok(()) => {
                            self.ok_line("Client added.")?;
                            self.list_clients(manager)?;
                        }
                        Err(e) => self.report_failure(&e)?,
                    }
                }
                "r" => {
                    let Some(raw) = self.prompt("Client id: ")? else {
                        return Ok(Flow::Exit);
                    };
                    match parse_client_id(&raw).and_then(|id| manager.remove_client(id)) {
                        Ok(()) => {
                            self.ok_line("Client removed.")?;
                            self.list_clients(manager)?;
                        }
                        Err(e) => self.report_failure(&e)?,
                    }
                }
                "l" => self.list_clients(manager)?,
                "b" | "" => return Ok(Flow::Continue),
                other => self.error_line(&format!("Unknown action '{}'.", other))?,
            }
        }
    }

    fn list_rooms<C: Clock>(&mut self, manager: &ReservationManager<C>) -> Result<()> {
        writeln!(self.output, "Rooms:")?;
        if manager.rooms().is_empty() {
            writeln!(self.output, "No rooms registered.")?;
        }
        for room in manager.rooms() {
            writeln!(
                self.output,
                "{}, Available: {}",
                room_line(room),
                if room.is_available() { "Yes" } else { "No" }
            )?;
        }
        Ok(())
    }

    fn manage_rooms<C: Clock>(&mut self, manager: &mut ReservationManager<C>) -> Result<Flow> {
        self.list_rooms(manager)?;
        loop {
            let Some(action) = self.prompt("[a]dd, [r]emove, [l]ist, [b]ack: ")? else {
                return Ok(Flow::Exit);
            };
            match action.to_ascii_lowercase().as_str() {
                "a" => {
                    let mut form = RoomForm::default();
                    for (label, slot) in [
                        ("Room id: ", &mut form.id),
                        ("Room name: ", &mut form.name),
                        ("Price: ", &mut form.price),
                    ] {
                        let Some(value) = self.prompt(label)? else {
                            return Ok(Flow::Exit);
                        };
                        *slot = value;
                    }
                    match form.into_room().and_then(|r| manager.add_room(r)) {
                        Ok(()) => {
                            self.ok_line("Room added.")?;
                            self.list_rooms(manager)?;
                        }
                        Err(e) => self.report_failure(&e)?,
                    }
                }
                "r" => {
                    let Some(raw) = self.prompt("Room id: ")? else {
                        return Ok(Flow::Exit);
                    };
                    match parse_room_id(&raw).and_then(|id| manager.remove_room(id)) {
                        Ok(()) => {
                            self.ok_line("Room removed.")?;
                            self.list_rooms(manager)?;
                        }
                        Err(e) => self.report_failure(&e)?,
                    }
                }
                "l" => self.list_rooms(manager)?,
                "b" | "" => return Ok(Flow::Continue),
                other => self.error_line(&format!("Unknown action '{}'.", other))?,
            }
        }
    }

    fn export_reservations<C: Clock>(&mut self, manager: &ReservationManager<C>) -> Result<Flow> {
        let default_path = format!("reservations.{}", self.export_format.extension());
        let Some(path) = self.prompt(&format!("Export path [{}]: ", default_path))? else {
            return Ok(Flow::Exit);
        };
        let Some(format_raw) = self.prompt(&format!("Format [{}]: ", self.export_format))? else {
            return Ok(Flow::Exit);
        };

        let path = if path.is_empty() { default_path } else { path };
        let format = if format_raw.is_empty() {
            Ok(self.export_format)
        } else {
            format_raw.parse::<ReportFormat>()
        };

        let report = ReservationReport::from_manager(manager);
        let outcome = validate_path("export path", &path)
            .and(format)
            .and_then(|format| report.export(&path, format));
        match outcome {
            Ok(written) => {
                let message = format!(
                    "Exported {} reservation(s) to {}.",
                    report.rows.len(),
                    written.display()
                );
                self.ok_line(&message)?;
            }
            Err(e) => self.report_failure(&e)?,
        }
        Ok(Flow::Continue)
    }
}

fn room_line(room: &Room) -> String {
    format!("ID: {}, Name: {}, Price: {}", room.id, room.name, room.price)
}

fn client_line(client: &Client) -> String {
    format!(
        "ID: {}, Name: {}, National ID: {}, Age: {}",
        client.id, client.name, client.national_id, client.age
    )
}
