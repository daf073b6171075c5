//! Core domain types
//!
//! These types mirror the documents returned by the control plane. Every
//! attribute the renderer does not inspect is kept in a pass-through map so a
//! fetched document can be written back out without losing data.

pub mod service;
pub mod task_definition;
