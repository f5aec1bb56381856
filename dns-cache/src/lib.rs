pub mod asynchronous;
pub mod synchronous;
