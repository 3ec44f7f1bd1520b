pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod table;

pub use api::{ApiClient, HrApi};
pub use config::DashConfig;
pub use error::{ApiError, ApiResult, DepartmentError};
pub use session::Session;
