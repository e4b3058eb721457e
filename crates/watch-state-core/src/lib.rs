pub mod error;
pub mod history;
pub mod recommend;
pub mod saved_list;
pub mod storage;

pub use error::StoreError;
pub use history::{LocalHistoryStore, HISTORY_KEY, MAX_HISTORY};
pub use recommend::{RecommendationAggregator, MAX_RECOMMENDATIONS, SEED_COUNT};
pub use saved_list::{SavedListStore, SessionState};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
