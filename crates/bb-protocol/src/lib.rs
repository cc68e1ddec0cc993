pub mod chat;
pub mod entities;
pub mod query;

pub use chat::*;
pub use entities::*;
pub use query::*;
