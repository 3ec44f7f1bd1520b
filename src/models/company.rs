use serde::{Deserialize, Serialize};

use super::field::Field;
use crate::api::types::{RawAccount, RawCompany, RawDepartment, RawEntity, RawLocation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: String,
    pub legal_name: Field,
    pub ein: Field,
    pub entity: Option<Entity>,
    pub primary_email: Field,
    pub primary_phone_number: Field,
    pub accounts: Option<Vec<Account>>,
    pub departments: Option<Vec<Department>>,
    pub locations: Option<Vec<Location>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_type: Field,
    pub subtype: Field,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_name: Field,
    pub account_number: Field,
    pub account_type: Field,
    pub institution_name: Field,
    pub routing_number: Field,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub name: Field,
    pub parent: Option<String>,
}

/// A street address. Used for company locations and employee residences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Location {
    pub line1: Field,
    pub line2: Field,
    pub city: Field,
    pub state: Field,
    pub postal_code: Field,
    pub country: Field,
}

impl CompanyProfile {
    /// Normalize a raw company record. Returns `None` when the record has no id,
    /// which the API uses to signal an unusable response.
    pub fn from_raw(raw: RawCompany) -> Option<Self> {
        let id = raw.id.filter(|id| !id.is_empty())?;
        Some(Self {
            id,
            legal_name: raw.legal_name.into(),
            ein: raw.ein.into(),
            entity: raw.entity.map(Entity::from_raw),
            primary_email: raw.primary_email.into(),
            primary_phone_number: raw.primary_phone_number.into(),
            accounts: raw
                .accounts
                .map(|accounts| accounts.into_iter().map(Account::from_raw).collect()),
            departments: raw
                .departments
                .map(|departments| departments.into_iter().map(Department::from_raw).collect()),
            locations: raw
                .locations
                .map(|locations| locations.into_iter().map(Location::from_raw).collect()),
        })
    }
}

impl Entity {
    fn from_raw(raw: RawEntity) -> Self {
        Self {
            entity_type: raw.entity_type.into(),
            subtype: raw.subtype.into(),
        }
    }
}

impl Account {
    fn from_raw(raw: RawAccount) -> Self {
        Self {
            account_name: raw.account_name.into(),
            account_number: raw.account_number.into(),
            account_type: raw.account_type.into(),
            institution_name: raw.institution_name.into(),
            routing_number: raw.routing_number.into(),
        }
    }

    /// Account number with all but the last four digits masked.
    pub fn masked_number(&self) -> Option<String> {
        let number = self.account_number.as_deref()?;
        let count = number.chars().count();
        if count <= 4 {
            return Some(number.to_string());
        }
        let tail: String = number.chars().skip(count - 4).collect();
        Some(format!("{}{}", "•".repeat(count - 4), tail))
    }
}

impl Department {
    pub(crate) fn from_raw(raw: RawDepartment) -> Self {
        Self {
            name: raw.name.into(),
            parent: raw
                .parent
                .and_then(|p| p.name)
                .filter(|name| !name.trim().is_empty()),
        }
    }
}

impl Location {
    pub(crate) fn from_raw(raw: RawLocation) -> Self {
        Self {
            line1: raw.line1.into(),
            line2: raw.line2.into(),
            city: raw.city.into(),
            state: raw.state.into(),
            postal_code: raw.postal_code.into(),
            country: raw.country.into(),
        }
    }

    /// "City, ST 12345" built from whichever parts are present.
    pub fn city_line(&self) -> Option<String> {
        let city_state = match (self.city.as_deref(), self.state.as_deref()) {
            (Some(c), Some(s)) => Some(format!("{}, {}", c, s)),
            (Some(c), None) => Some(c.to_string()),
            (None, Some(s)) => Some(s.to_string()),
            (None, None) => None,
        };
        match (city_state, self.postal_code.as_deref()) {
            (Some(cs), Some(zip)) => Some(format!("{} {}", cs, zip)),
            (Some(cs), None) => Some(cs),
            (None, Some(zip)) => Some(zip.to_string()),
            (None, None) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        [
            &self.line1,
            &self.line2,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .all(|f| !f.is_available())
    }
}
