/* 📖 # Why a separate path crate?
crosspath_path is purely lexical: it parses, cleans and renders paths of any platform without
touching a filesystem. The filesystems in crosspath_fs key their entries by the strings this crate
produces, and the CLI exposes the same operations directly.
*/

pub mod comparison;
pub mod config;
pub mod file_path;
pub mod parser;
pub mod provider;
mod provider_tests;
pub mod volume;

pub use comparison::Comparison;
pub use config::ProviderConfig;
pub use file_path::FilePath;
pub use parser::{Parser, PathStyle};
pub use provider::Provider;
pub use volume::Volume;
