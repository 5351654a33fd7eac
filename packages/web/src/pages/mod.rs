//! Pages

mod category;
mod explore;

pub use category::*;
pub use explore::*;
