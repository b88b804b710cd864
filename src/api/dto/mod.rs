pub mod payroll_entries;
pub mod session;
