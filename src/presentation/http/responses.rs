// src/presentation/http/responses.rs
use crate::application::dto::{ArticleDto, PaginatedDto};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

/// `{"data": article}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponse {
    pub data: ArticleDto,
}

impl From<ArticleDto> for ArticleResponse {
    fn from(data: ArticleDto) -> Self {
        Self { data }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
}

/// `{"data": [article], "meta": {...}}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticleCollectionResponse {
    pub data: Vec<ArticleDto>,
    pub meta: PageMeta,
}

impl From<PaginatedDto<ArticleDto>> for ArticleCollectionResponse {
    fn from(page: PaginatedDto<ArticleDto>) -> Self {
        Self {
            meta: PageMeta {
                current_page: page.page,
                per_page: page.per_page,
                total: page.total,
                last_page: page.last_page,
            },
            data: page.items,
        }
    }
}
