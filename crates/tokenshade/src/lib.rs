#![forbid(unsafe_code)]

pub mod check;
pub mod cleanup;
pub mod cli;
pub mod document;
pub mod error;
pub mod logging;
pub mod palette;
pub mod reference;
pub mod report;
pub mod resolve;
pub mod util;

pub use cleanup::{CleanupOptions, cleanup_darkmode};
pub use cli::run_from_env;
pub use document::{DocumentLayout, GroupPath, TokenDocument};
pub use error::{Result, TokenError};
