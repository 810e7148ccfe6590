use crate::domain::article::entity::Article;
use crate::domain::article::value_objects::ArticleId;
use crate::domain::errors::DomainResult;
use crate::domain::pagination::{Page, PageRequest};
use async_trait::async_trait;

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn find_all(&self, page: PageRequest) -> DomainResult<Page<Article>>;

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;

    /// Inserts when the id is unset and updates otherwise, writing the
    /// assigned id and timestamps back onto `article`.
    async fn save(&self, article: &mut Article) -> DomainResult<()>;

    async fn search_by_title_or_content(
        &self,
        query: &str,
        page: PageRequest,
    ) -> DomainResult<Page<Article>>;
}
