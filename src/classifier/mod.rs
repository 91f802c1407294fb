pub mod config;
pub mod policy;

pub use config::ClassifierConfig;
pub use policy::{priority, SourceClassifier};
