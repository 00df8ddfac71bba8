pub mod accessor;
pub mod create;
pub mod deserialize;
pub mod destroy;
pub mod label;
pub mod serialize;
