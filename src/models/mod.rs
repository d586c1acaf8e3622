pub mod admin;

pub use admin::AdministratorRecord;
