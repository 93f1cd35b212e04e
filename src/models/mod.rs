//! Data models for the employee roster.

pub mod employee;

pub use employee::{Employee, JobTitle};
