//! EduManage server
//!
//! axum service over PostgreSQL: session gate, API handlers, services and
//! repositories.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod repository;
pub mod service;
pub mod state;
