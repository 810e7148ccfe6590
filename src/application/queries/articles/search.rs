use super::{ArticleQueryService, list::ListArticlesQuery};
use crate::{
    application::{
        dto::{ArticleDto, PaginatedDto},
        error::ApplicationResult,
    },
    domain::pagination::PageRequest,
};

pub struct SearchArticlesQuery {
    pub query: String,
    pub page: u32,
}

impl ArticleQueryService {
    pub async fn search_articles(
        &self,
        query: SearchArticlesQuery,
    ) -> ApplicationResult<PaginatedDto<ArticleDto>> {
        let trimmed = query.query.trim();
        if trimmed.is_empty() {
            return self
                .list_articles(ListArticlesQuery { page: query.page })
                .await;
        }

        let page = self
            .repo
            .search_by_title_or_content(trimmed, PageRequest::new(query.page))
            .await?;
        Ok(page.into())
    }
}
