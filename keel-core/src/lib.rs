//! Keel Core
//!
//! Core types and transforms for rendering ECS task definitions.
//!
//! This crate contains:
//! - Domain types: services, task definitions and their container definitions
//! - DTOs: request/response envelopes for the control-plane API
//! - Transforms: container selection, environment merging, sanitization

pub mod domain;
pub mod dto;
pub mod error;
pub mod transform;

pub use error::DeployError;
