pub mod codec;
pub mod roster;
pub mod transfer;
