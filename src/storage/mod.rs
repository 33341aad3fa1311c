use crate::name::PasteName;

pub mod file;

pub use file::FileStorage;

pub trait Storage {
    /// Get a paste's content, creating it empty if it does not exist yet.
    async fn get_or_create(&mut self, name: &PasteName) -> crate::ApiResult<String>;

    /// Replace a paste's content.
    async fn put(&mut self, name: &PasteName, content: &str) -> crate::ApiResult<()>;
}
