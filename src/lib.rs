pub mod access;
pub mod cli;
pub mod config;
pub mod context;
pub mod db;
pub mod dues;
pub mod error;
pub mod export;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
