// Front desk: the interactive console and the forms it fills in.

pub mod console;
pub mod forms;

pub use console::Console;
