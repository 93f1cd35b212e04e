pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod paginate;
pub mod session;
pub mod storage;
pub mod view;

pub use error::{AppError, Result};
