use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::company::Location;
use super::field::Field;
use crate::api::types::{RawContactChannel, RawIndividual, RawIndividualBatch};

/// Full record for one individual, fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDetail {
    pub id: String,
    pub first_name: Field,
    pub middle_name: Field,
    pub last_name: Field,
    pub preferred_name: Field,
    pub dob: Field,
    pub gender: Field,
    pub ethnicity: Field,
    pub ssn: Field,
    pub emails: Option<Vec<ContactChannel>>,
    pub phone_numbers: Option<Vec<ContactChannel>>,
    pub residence: Option<Location>,
}

/// A typed email address or phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactChannel {
    pub data: Field,
    pub channel_type: Field,
}

impl EmployeeDetail {
    /// Normalize the first element of a batch response.
    ///
    /// `requested_id` is used when the response element does not echo an id.
    /// Returns `None` for an empty batch or an element without a body.
    pub fn from_batch(batch: RawIndividualBatch, requested_id: &str) -> Option<Self> {
        let first = batch.responses?.into_iter().next()?;
        let id = first
            .individual_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| requested_id.to_string());
        Some(Self::from_raw(id, first.body?))
    }

    fn from_raw(id: String, raw: RawIndividual) -> Self {
        Self {
            id,
            first_name: raw.first_name.into(),
            middle_name: raw.middle_name.into(),
            last_name: raw.last_name.into(),
            preferred_name: raw.preferred_name.into(),
            dob: raw.dob.into(),
            gender: raw.gender.into(),
            ethnicity: raw.ethnicity.into(),
            ssn: raw.ssn.into(),
            emails: raw.emails.map(ContactChannel::from_list),
            phone_numbers: raw.phone_numbers.map(ContactChannel::from_list),
            residence: raw.residence.map(Location::from_raw),
        }
    }

    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            "(unnamed)".to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Date of birth as "Mar 15, 1985". Falls back to the raw text when it is
    /// not an ISO date.
    pub fn dob_display(&self) -> Field {
        match self.dob.as_deref() {
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Field::Value(date.format("%b %-d, %Y").to_string()),
                Err(_) => self.dob.clone(),
            },
            None => Field::NotAvailable,
        }
    }

    /// SSN with everything but the last four characters masked.
    pub fn ssn_masked(&self) -> Field {
        match self.ssn.as_deref() {
            Some(ssn) => {
                let digits: String = ssn.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
                let count = digits.chars().count();
                let tail: String = digits.chars().skip(count.saturating_sub(4)).collect();
                Field::Value(format!("***-**-{}", tail))
            }
            None => Field::NotAvailable,
        }
    }
}

impl ContactChannel {
    fn from_list(raw: Vec<RawContactChannel>) -> Vec<Self> {
        raw.into_iter()
            .map(|c| Self {
                data: c.data.into(),
                channel_type: c.channel_type.into(),
            })
            .filter(|c| c.data.is_available())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RawIndividualBatch {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_first_name_only() {
        let detail = EmployeeDetail::from_batch(
            parse(r#"{"responses":[{"individual_id":"e1","body":{"first_name":"Jo"}}]}"#),
            "e1",
        )
        .unwrap();
        assert_eq!(detail.id, "e1");
        assert_eq!(detail.first_name, Field::from("Jo"));
        for field in [
            &detail.middle_name,
            &detail.last_name,
            &detail.preferred_name,
            &detail.dob,
            &detail.gender,
            &detail.ethnicity,
            &detail.ssn,
        ] {
            assert_eq!(*field, Field::NotAvailable);
        }
        assert!(detail.residence.is_none());
        assert!(detail.emails.is_none());
        assert_eq!(detail.display_name(), "Jo");
    }

    #[test]
    fn test_empty_batch() {
        assert!(EmployeeDetail::from_batch(parse(r#"{"responses":[]}"#), "e1").is_none());
        assert!(EmployeeDetail::from_batch(parse("{}"), "e1").is_none());
    }

    #[test]
    fn test_missing_body_is_empty() {
        assert!(EmployeeDetail::from_batch(parse(r#"{"responses":[{}]}"#), "e9").is_none());
        assert!(EmployeeDetail::from_batch(
            parse(r#"{"responses":[{"individual_id":"e1","code":404}]}"#),
            "e1"
        )
        .is_none());
    }

    #[test]
    fn test_missing_id_uses_requested_id() {
        let detail =
            EmployeeDetail::from_batch(parse(r#"{"responses":[{"body":{}}]}"#), "e9").unwrap();
        assert_eq!(detail.id, "e9");
        assert_eq!(detail.display_name(), "(unnamed)");
    }

    #[test]
    fn test_residence_fields_independent() {
        let detail = EmployeeDetail::from_batch(
            parse(
                r#"{"responses":[{"individual_id":"e1","body":{
                    "residence":{"line1":"1 Main St","city":"Austin","state":null},
                    "emails":[{"data":"jo@example.com","type":"work"},{"data":null,"type":"personal"}],
                    "phone_numbers":[{"data":"555-0100"}]
                }}]}"#,
            ),
            "e1",
        )
        .unwrap();
        let residence = detail.residence.unwrap();
        assert_eq!(residence.line1, Field::from("1 Main St"));
        assert_eq!(residence.state, Field::NotAvailable);
        assert_eq!(residence.city_line().as_deref(), Some("Austin"));

        let emails = detail.emails.unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].channel_type, Field::from("work"));

        let phones = detail.phone_numbers.unwrap();
        assert_eq!(phones[0].channel_type, Field::NotAvailable);
    }

    #[test]
    fn test_dob_display() {
        let mut detail = EmployeeDetail::from_batch(
            parse(r#"{"responses":[{"individual_id":"e1","body":{"dob":"1985-03-15"}}]}"#),
            "e1",
        )
        .unwrap();
        assert_eq!(detail.dob_display(), Field::from("Mar 15, 1985"));

        detail.dob = Field::from("03/15/1985");
        assert_eq!(detail.dob_display(), Field::from("03/15/1985"));

        detail.dob = Field::NotAvailable;
        assert_eq!(detail.dob_display(), Field::NotAvailable);
    }

    #[test]
    fn test_ssn_masked() {
        let detail = EmployeeDetail::from_batch(
            parse(r#"{"responses":[{"individual_id":"e1","body":{"ssn":"123-45-6789"}}]}"#),
            "e1",
        )
        .unwrap();
        assert_eq!(detail.ssn_masked(), Field::from("***-**-6789"));
    }
}
