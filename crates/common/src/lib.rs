pub mod configuration;
pub mod consts;
pub mod conversation;
pub mod errors;
