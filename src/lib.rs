// Library interface for jlv
// Exposes the record view engine and the interactive layer built on it

pub mod app;
pub mod config;
pub mod event;
pub mod filter;
pub mod handlers;
pub mod logging;
pub mod memo;
pub mod navigation;
pub mod record;
pub mod search;
pub mod session;
pub mod sort;
pub mod store;
pub mod tail;
pub mod tui;
pub mod view;
pub mod watcher;

#[cfg(test)]
mod test_utils;
