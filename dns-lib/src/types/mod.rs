pub mod domain_name;
pub mod label;
