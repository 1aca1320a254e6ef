pub mod schedule;
pub mod ticket;
pub mod timeline;

pub use schedule::Schedule;
pub use ticket::{Ticket, TicketPatch};
pub use timeline::{DateWindow, TimelineState, TimelineView};
