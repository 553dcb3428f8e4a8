pub mod quote;
pub mod seed;
pub mod translation;
