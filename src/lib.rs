pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod logger;
pub mod model;
pub mod reduce;
pub mod service;
pub mod store;

pub use config::*;
pub use error::*;
pub use export::{Export, ExportError};
pub use fetch::*;
pub use model::*;
pub use reduce::*;
pub use service::*;
pub use store::*;
