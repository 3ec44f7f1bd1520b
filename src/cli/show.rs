use anyhow::{anyhow, Result};

use super::display::{print_company, print_departments, print_employee};
use super::fail_on_errors;
use crate::api::HrApi;
use crate::models::Provider;
use crate::session::Session;

/// Execute the show command: one employee's full record
pub fn run_show<A: HrApi>(session: &mut Session<A>, provider: Provider, employee_id: &str) -> Result<()> {
    let employee_id = employee_id.trim();
    if employee_id.is_empty() {
        return Err(anyhow!("Employee id cannot be empty."));
    }

    if session.open_provider(provider).is_ok() && session.select_employee(Some(employee_id)) {
        if let Some(detail) = session.employee() {
            print_employee(detail);
        }
    }

    fail_on_errors(session)
}

/// Execute the company command
pub fn run_company<A: HrApi>(session: &mut Session<A>, provider: Provider) -> Result<()> {
    if let Ok((ticket, token)) = session.open_provider(provider) {
        session.fetch_company_profile(ticket, &token);
    }

    if let Some(company) = session.company() {
        print_company(company);
    }

    fail_on_errors(session)
}

/// Execute the departments command
pub fn run_departments<A: HrApi>(session: &mut Session<A>, provider: Provider) -> Result<()> {
    if let Ok((ticket, token)) = session.open_provider(provider) {
        session.fetch_company_profile(ticket, &token);
    }

    if let Some(company) = session.company() {
        print_departments(company);
    }

    fail_on_errors(session)
}
