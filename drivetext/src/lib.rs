pub mod api;
pub mod auth;
pub mod config;
pub mod drive;
pub mod error;
pub mod extraction;
pub mod models;
pub mod services;
