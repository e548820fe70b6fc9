pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod installer;
pub mod presenter;
pub mod process;
pub mod verification;

pub use config::Config;
pub use error::RedistPrepError;
