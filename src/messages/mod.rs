pub mod storage;
pub mod types;

pub use storage::MessageStore;
pub use types::{Message, Rating, Sender};
