pub mod rclass;
pub mod rtype;
pub mod rcode;
pub mod opcode;

pub mod resource_record;
