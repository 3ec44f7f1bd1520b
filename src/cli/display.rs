use crate::error::DepartmentError;
use crate::models::{
    build_department_forest, CompanyProfile, ContactChannel, DepartmentNode, EmployeeDetail,
    Field, Location, Provider, NOT_AVAILABLE,
};
use crate::session::ErrorQueue;

/// Width of the label column in detail views
const LABEL_WIDTH: usize = 16;

fn labeled(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<width$}{}", label, value, width = LABEL_WIDTH)
}

/// Print supported providers, one per line
pub fn print_providers() {
    for provider in Provider::ALL {
        println!("{:<14}{}", provider.as_str(), provider.label());
    }
}

/// Print queued errors as banners, oldest first
pub fn print_error_banners(errors: &ErrorQueue) {
    for entry in errors.iter() {
        println!("! {}", entry.message);
    }
    if !errors.is_empty() {
        println!();
    }
}

pub fn print_company(company: &CompanyProfile) {
    for line in company_lines(company) {
        println!("{}", line);
    }
}

pub fn company_lines(company: &CompanyProfile) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(company.legal_name.to_string());
    lines.push(String::new());
    lines.push(labeled("id", &company.id));
    lines.push(labeled("ein", &company.ein));
    match &company.entity {
        Some(entity) => {
            lines.push(labeled("entity", &entity.entity_type));
            lines.push(labeled("subtype", &entity.subtype));
        }
        None => lines.push(labeled("entity", NOT_AVAILABLE)),
    }
    lines.push(labeled("email", &company.primary_email));
    lines.push(labeled("phone", &company.primary_phone_number));

    lines.push(String::new());
    lines.push("ACCOUNTS".to_string());
    match &company.accounts {
        Some(accounts) if !accounts.is_empty() => {
            for account in accounts {
                let number = account
                    .masked_number()
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string());
                lines.push(format!("  {}", account.account_name));
                lines.push(labeled("  number", number));
                lines.push(labeled("  type", &account.account_type));
                lines.push(labeled("  institution", &account.institution_name));
                lines.push(labeled("  routing", &account.routing_number));
            }
        }
        Some(_) => lines.push("  None.".to_string()),
        None => lines.push(format!("  {}", NOT_AVAILABLE)),
    }

    lines.push(String::new());
    lines.push("DEPARTMENTS".to_string());
    match &company.departments {
        Some(departments) if !departments.is_empty() => {
            lines.push(format!("  {} total, [d] for tree", departments.len()));
        }
        Some(_) => lines.push("  None.".to_string()),
        None => lines.push(format!("  {}", NOT_AVAILABLE)),
    }

    lines.push(String::new());
    lines.push("LOCATIONS".to_string());
    match &company.locations {
        Some(locations) if !locations.is_empty() => {
            for location in locations {
                lines.extend(location_lines(location));
            }
        }
        Some(_) => lines.push("  None.".to_string()),
        None => lines.push(format!("  {}", NOT_AVAILABLE)),
    }

    lines
}

fn location_lines(location: &Location) -> Vec<String> {
    if location.is_empty() {
        return vec![format!("  {}", NOT_AVAILABLE)];
    }
    [
        location.line1.as_deref().map(str::to_string),
        location.line2.as_deref().map(str::to_string),
        location.city_line(),
        location.country.as_deref().map(str::to_string),
    ]
    .into_iter()
    .flatten()
    .map(|line| format!("  {}", line))
    .collect()
}

/// Print a company's departments as an indented tree
pub fn print_departments(company: &CompanyProfile) {
    for line in department_lines(company) {
        println!("{}", line);
    }
}

pub fn department_lines(company: &CompanyProfile) -> Vec<String> {
    let Some(departments) = &company.departments else {
        return vec![NOT_AVAILABLE.to_string()];
    };
    match build_department_forest(departments) {
        Ok(forest) if forest.is_empty() => vec!["No departments.".to_string()],
        Ok(forest) => tree_lines(&forest),
        Err(DepartmentError::Cycle { name }) => {
            vec![format!("Department hierarchy is circular at '{}'.", name)]
        }
    }
}

pub fn tree_lines(forest: &[DepartmentNode]) -> Vec<String> {
    let mut lines = Vec::new();
    for node in forest {
        push_node(&mut lines, node, 0);
    }
    lines
}

fn push_node(lines: &mut Vec<String>, node: &DepartmentNode, depth: usize) {
    lines.push(format!("{}{}", "  ".repeat(depth), node.name));
    for child in &node.children {
        push_node(lines, child, depth + 1);
    }
}

pub fn print_employee(detail: &EmployeeDetail) {
    for line in employee_lines(detail) {
        println!("{}", line);
    }
}

pub fn employee_lines(detail: &EmployeeDetail) -> Vec<String> {
    let mut lines = vec![detail.display_name(), String::new()];

    lines.push(labeled("id", &detail.id));
    lines.push(labeled("first", &detail.first_name));
    lines.push(labeled("middle", &detail.middle_name));
    lines.push(labeled("last", &detail.last_name));
    lines.push(labeled("preferred", &detail.preferred_name));
    lines.push(labeled("born", detail.dob_display()));
    lines.push(labeled("gender", &detail.gender));
    lines.push(labeled("ethnicity", &detail.ethnicity));
    lines.push(labeled("ssn", detail.ssn_masked()));

    lines.push(String::new());
    lines.push("EMAILS".to_string());
    lines.extend(channel_lines(detail.emails.as_deref()));

    lines.push(String::new());
    lines.push("PHONES".to_string());
    lines.extend(channel_lines(detail.phone_numbers.as_deref()));

    lines.push(String::new());
    lines.push("RESIDENCE".to_string());
    match &detail.residence {
        Some(residence) => lines.extend(location_lines(residence)),
        None => lines.push(format!("  {}", NOT_AVAILABLE)),
    }

    lines
}

fn channel_lines(channels: Option<&[ContactChannel]>) -> Vec<String> {
    match channels {
        None => vec![format!("  {}", NOT_AVAILABLE)],
        Some([]) => vec!["  None.".to_string()],
        Some(channels) => channels
            .iter()
            .map(|c| match &c.channel_type {
                Field::Value(kind) => format!("  {} ({})", c.data, kind),
                Field::NotAvailable => format!("  {}", c.data),
            })
            .collect(),
    }
}
