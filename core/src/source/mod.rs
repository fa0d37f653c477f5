pub mod error;
pub mod file;
pub mod github;
pub mod traits;

// Re-export
pub use error::SourceError;
pub use file::FileActivitySource;
pub use github::GitHubActivitySource;
pub use traits::ActivitySource;
