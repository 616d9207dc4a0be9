pub mod capture;
pub mod provision;
pub mod replicate;
pub mod validate;
