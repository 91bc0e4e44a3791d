pub mod audit;
pub mod curriculum;
pub mod error;
pub mod loader;
pub mod preprocess;
pub mod store;
pub mod validate;

pub use error::ContentError;
pub use store::{ContentStore, LessonStore, StoreMetadata};

#[cfg(test)]
mod tests;
