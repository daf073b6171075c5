//! Service layer
//!
//! Business logic of the CLI. The render service sequences the control-plane
//! lookups and the core transforms; it only sees the control plane through
//! the `ControlPlane` trait so it can run against an in-memory fake.

mod render;

pub use render::{DeployProfile, RenderOutcome, run};
