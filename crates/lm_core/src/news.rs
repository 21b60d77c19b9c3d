use async_trait::async_trait;
use std::fmt;

use crate::types::{Article, NewsQuery};
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Searches recent articles, most relevant first as ranked by the provider.
    async fn search(&self, query: &NewsQuery) -> Result<Vec<Article>>;
}
