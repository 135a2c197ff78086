pub mod api;
pub mod config;
pub mod control;
pub mod models;
pub mod storage;
