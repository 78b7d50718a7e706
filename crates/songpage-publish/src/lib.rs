//! Page generation side effects for songpage.
//!
//! Loads configuration, writes rendered pages to disk and optionally stages,
//! commits and pushes them with git.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod git;
pub mod output;
pub mod pipeline;

pub use config::{Config, OverwritePolicy};
pub use error::{PublishError, PublishResult};
pub use git::{GitRunner, GitStep, Publisher, SystemGit};
pub use pipeline::{generate, GeneratedPage};
