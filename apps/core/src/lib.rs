pub mod config;
pub mod contract;
pub mod core_service;
pub mod discovery;
pub mod launcher;
pub mod logging;
pub mod metadata;
pub mod model;
pub mod runtime;
pub mod search;
pub mod session;
pub mod settings_reader;
pub mod transport;
