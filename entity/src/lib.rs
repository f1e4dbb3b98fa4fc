pub mod departments;
pub mod employees;
