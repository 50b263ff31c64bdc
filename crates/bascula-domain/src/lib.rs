//! Domain layer: drivers, generation parameters, ticket records and the
//! services that plan and synthesize ticket sequences.

pub mod model;
pub mod repository;
pub mod service;
