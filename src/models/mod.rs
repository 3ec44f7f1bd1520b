mod company;
mod department;
mod directory;
mod employee;
mod field;
mod provider;

pub use company::{Account, CompanyProfile, Department, Entity, Location};
pub use department::{build_department_forest, DepartmentNode};
pub use directory::{rows_from_raw, DirectoryRow};
pub use employee::{ContactChannel, EmployeeDetail};
pub use field::{Field, NOT_AVAILABLE};
pub use provider::Provider;
