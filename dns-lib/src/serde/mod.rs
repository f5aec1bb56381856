pub mod const_byte_counts;
pub mod wire;
