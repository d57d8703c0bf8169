//! resume-chat - terminal client for a personal assistant's streaming chat API
//!
//! The core is the streaming consumer: [`stream`] turns response bytes into
//! events and [`session`] drives one exchange against a [`traits::ChatView`].
//! The chat screen, the one-shot CLI and the tests all plug into that seam.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod health_check;
pub mod logging;
pub mod models;
pub mod session;
pub mod stream;
pub mod terminal;
pub mod traits;
pub mod ui;
