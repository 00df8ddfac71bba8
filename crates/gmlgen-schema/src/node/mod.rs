mod entity;
mod field;
mod model;

pub use entity::*;
pub use field::*;
pub use model::*;
