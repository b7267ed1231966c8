//! Typed client for the group endpoints of the Tableau REST API.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::TableauConf;
pub use error::{ConfigError, GroupError, TransportError};
pub use models::group::{Group, GroupImport, NewGroup, PageInfo};
pub use services::group_service::GroupService;
pub use services::transport::{ApiRequest, HttpTransport, Transport};
