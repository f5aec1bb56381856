pub mod read_wire;
pub mod write_wire;

pub mod compression_map;
pub mod to_wire;
pub mod from_wire;

#[cfg(test)]
pub(crate) mod circular_test;
