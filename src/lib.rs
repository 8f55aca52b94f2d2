// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod controller;
pub mod help;
pub mod model;
pub mod parser;
pub mod response;
pub mod storage;
pub mod store;
