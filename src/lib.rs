pub mod capture;
pub mod download;
pub mod error;
pub mod logger;
pub mod options;
pub mod progress;
pub mod target;
pub mod utils;

pub use options::Options;
