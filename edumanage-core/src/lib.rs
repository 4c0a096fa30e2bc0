//! EduManage Core
//!
//! Core types shared by the EduManage server, client and CLI.
//!
//! This crate contains:
//! - Domain types: Users, students, teachers, subjects, schedules, grades, invoices
//! - DTOs: Request and response bodies of the HTTP API
//! - Filters: The list predicates and pagination used by every list view

pub mod domain;
pub mod dto;
pub mod filter;
