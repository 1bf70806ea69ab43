//! Data models: the produced expense record and the import configuration.

pub mod config;
pub mod expense;
