use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, PaginatedDto},
        error::ApplicationResult,
    },
    domain::pagination::PageRequest,
};

pub struct ListArticlesQuery {
    pub page: u32,
}

impl ArticleQueryService {
    pub async fn list_articles(
        &self,
        query: ListArticlesQuery,
    ) -> ApplicationResult<PaginatedDto<ArticleDto>> {
        let page = self.repo.find_all(PageRequest::new(query.page)).await?;
        Ok(page.into())
    }
}
