pub mod cli;
pub mod collaborative;
pub mod config;
pub mod content;
mod db;
pub mod error;
pub mod hybrid;
pub mod ranking;
pub mod recommender;
pub mod similarity;
pub mod store;
pub mod utils;
pub mod vectorizer;

pub use config::{Opts, RecommendOptions};
pub use error::RecommendError;
pub use ranking::{ImageId, Ranking, UserId};
pub use recommender::Recommender;
pub use store::{ImageRecord, MemoryStore, Preference, PreferenceStore, Store, TagStore};
