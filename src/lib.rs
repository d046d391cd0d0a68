pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod evidence;
pub mod geocode;
pub mod models;
pub mod observability;
pub mod service;
pub mod state;
pub mod store;
