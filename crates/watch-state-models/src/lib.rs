pub mod catalog;
pub mod history;
pub mod media;
pub mod recommendation;
pub mod saved;
pub mod session;

pub use catalog::CatalogEntry;
pub use history::HistoryEntry;
pub use media::MediaKind;
pub use recommendation::Recommendation;
pub use saved::SavedItem;
pub use session::UserSession;
