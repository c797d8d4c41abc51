mod collection;
pub mod ranking;

pub use collection::CollectionError;
pub use collection::CollectionStore;
pub use collection::FileStorage;
pub use collection::MemoryStorage;
pub use collection::Storage;
pub use collection::next_rank;
pub use ranking::RankingEngine;
