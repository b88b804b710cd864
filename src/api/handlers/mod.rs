pub mod health;
pub mod payroll_entries;
pub mod session;
