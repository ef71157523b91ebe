pub mod discover;
pub mod exclude;
pub mod store;

pub use discover::{Target, discover};
pub use exclude::ExcludeList;
pub use store::{FileStore, FsStore};
