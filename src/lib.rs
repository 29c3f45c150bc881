pub mod app;
pub mod config;
pub mod download;
pub mod error;
pub mod upload;
pub mod utils;
pub mod widgets;

pub use app::CodegenUploader;
pub use config::CodegenConfig;
pub use error::CodegenError;
