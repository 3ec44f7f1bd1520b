//! Wire types for the sandbox aggregation API.
//!
//! Every field a provider may omit is an `Option` with `#[serde(default)]`;
//! normalization into display entities happens once, in `crate::models`.

use serde::{Deserialize, Serialize};

/// Products requested when creating a sandbox connection.
pub const SANDBOX_PRODUCTS: &[&str] = &["company", "directory", "individual", "employment"];

#[derive(Debug, Serialize)]
pub struct SandboxCreateRequest<'a> {
    pub provider: &'a str,
    pub products: &'a [&'a str],
}

#[derive(Debug, Default, Deserialize)]
pub struct SandboxCreateResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Error payload returned by the API on non-success responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCompany {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub legal_name: Option<String>,
    #[serde(default)]
    pub ein: Option<String>,
    #[serde(default)]
    pub entity: Option<RawEntity>,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub primary_phone_number: Option<String>,
    #[serde(default)]
    pub accounts: Option<Vec<RawAccount>>,
    #[serde(default)]
    pub departments: Option<Vec<RawDepartment>>,
    #[serde(default)]
    pub locations: Option<Vec<RawLocation>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEntity {
    #[serde(default, rename = "type")]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAccount {
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub institution_name: Option<String>,
    #[serde(default)]
    pub routing_number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDepartment {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent: Option<RawNameRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNameRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIdRef {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDirectory {
    #[serde(default)]
    pub individuals: Option<Vec<RawDirectoryIndividual>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDirectoryIndividual {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub manager: Option<RawIdRef>,
    #[serde(default)]
    pub department: Option<RawNameRef>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct IndividualRequest<'a> {
    pub requests: Vec<IndividualId<'a>>,
}

#[derive(Debug, Serialize)]
pub struct IndividualId<'a> {
    pub individual_id: &'a str,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIndividualBatch {
    #[serde(default)]
    pub responses: Option<Vec<RawIndividualResponse>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIndividualResponse {
    #[serde(default)]
    pub individual_id: Option<String>,
    #[serde(default)]
    pub body: Option<RawIndividual>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIndividual {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default)]
    pub emails: Option<Vec<RawContactChannel>>,
    #[serde(default)]
    pub phone_numbers: Option<Vec<RawContactChannel>>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub ethnicity: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub ssn: Option<String>,
    #[serde(default)]
    pub residence: Option<RawLocation>,
}

/// An email or phone entry: `{data, type}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawContactChannel {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default, rename = "type")]
    pub channel_type: Option<String>,
}
