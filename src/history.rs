mod clock;
mod entry;
pub mod storage;
mod store;

pub use clock::{Clock, SystemClock};
pub use entry::{HistoryEntry, HistoryMatch};
pub use storage::{BackgroundStore, FileStore, HISTORY_KEY, KeyValueStore, MemoryStore};
pub use store::FilterHistoryStore;
