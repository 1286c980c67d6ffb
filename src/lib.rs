pub mod assistant;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod ledger;
pub mod line_editor;
pub mod ui;
