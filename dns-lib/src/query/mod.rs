pub mod message;
pub mod qr;
pub mod question;
