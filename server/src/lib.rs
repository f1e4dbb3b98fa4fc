pub mod config;
pub mod departments;
pub mod dto;
pub mod employees;
pub mod http;
pub mod seed;
