pub mod ack;
pub mod identity;
pub mod query;

pub use ack::*;
pub use identity::*;
pub use query::*;
