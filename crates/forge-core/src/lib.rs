pub mod config;
pub mod logging;

pub mod archive;
pub mod download;
pub mod error;
pub mod installer;
pub mod release;
pub mod scaffold;
pub mod workspace;
