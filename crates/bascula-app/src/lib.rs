//! Application service layer - configuration, validation, report generation

pub mod config;
pub mod generation;
pub mod report_service;
pub mod repository;
pub mod roster;
