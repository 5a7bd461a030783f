pub mod commit;
pub mod repo;
pub mod summary;
