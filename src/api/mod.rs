//! Access to the sandbox aggregation API.

pub mod client;
pub mod types;

pub use client::ApiClient;

use crate::error::ApiResult;
use crate::models::Provider;
use types::{RawCompany, RawDirectory, RawIndividualBatch};

/// The four endpoints the dashboard reads from.
///
/// Implemented over HTTP by [`ApiClient`]; tests substitute canned responses.
pub trait HrApi {
    /// Create a sandbox connection for `provider` and return its access token.
    fn create_sandbox(&self, provider: Provider) -> ApiResult<String>;

    fn company(&self, token: &str) -> ApiResult<RawCompany>;

    fn directory(&self, token: &str) -> ApiResult<RawDirectory>;

    /// Request details for the given individuals in one batch.
    fn individuals(&self, token: &str, individual_ids: &[&str]) -> ApiResult<RawIndividualBatch>;
}
