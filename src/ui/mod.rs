pub mod dialogs;
pub mod theme;
pub mod ticket_table;
pub mod timeline_canvas;
pub mod toolbar;
