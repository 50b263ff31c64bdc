//! Domain model types

pub mod driver;
pub mod generation;
pub mod ticket;

pub use driver::Driver;
pub use generation::GenerationParameters;
pub use ticket::TicketRecord;
