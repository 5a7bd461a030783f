pub mod aggregate;
pub mod changelog;
pub mod truncate;
