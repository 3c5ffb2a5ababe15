// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;

pub mod classify;
pub mod listing;
pub mod models;
pub mod sift;
pub mod vocab;

pub mod cli;
pub mod csv;
pub mod file;
pub mod gui;
pub mod progress;
pub mod runner;
pub mod store;
pub mod table;
