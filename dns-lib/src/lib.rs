pub mod interface;
pub mod query;
pub mod resource_record;
pub mod serde;
pub mod types;
