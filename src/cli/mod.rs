pub mod convert;
pub mod server;
pub mod setup;
pub mod ui;
