//! Service implementations.
//!
//! This module contains the orchestration services composing rigforge-core
//! and rigforge-db.

pub mod catalog_service;
pub mod configuration_service;
pub mod user_service;
