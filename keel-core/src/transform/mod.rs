//! Pure transforms applied to a fetched task definition
//!
//! None of these touch the network or the filesystem.

pub mod environment;
pub mod sanitize;
pub mod select;

pub use environment::{BuildLabel, DOCKER_BUILD, GIT_REVISION, merge_environment};
pub use sanitize::sanitize;
pub use select::{Selection, SelectionPolicy, select_container};
