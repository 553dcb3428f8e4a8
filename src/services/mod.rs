pub mod ai;
pub mod ai_types;
pub mod catalog;
pub mod expand;
pub mod fingerprint;
pub mod qa;
pub mod seed;
pub mod store;
pub mod translate;
