// tests/support/mocks/article_repo.rs
use articles_api::domain::article::{Article, ArticleId, ArticleRepository};
use articles_api::domain::errors::{DomainError, DomainResult};
use articles_api::domain::pagination::{Page, PageRequest};
use async_trait::async_trait;
use std::sync::Mutex;

/// Vec-backed store with sequence ids, id ordering and case-insensitive
/// substring search.
#[derive(Default)]
pub struct InMemoryArticleRepo {
    articles: Mutex<Vec<Article>>,
    fail: bool,
}

impl InMemoryArticleRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a persistence error.
    pub fn failing() -> Self {
        Self {
            articles: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn len(&self) -> usize {
        self.articles.lock().unwrap().len()
    }

    fn check(&self) -> DomainResult<()> {
        if self.fail {
            Err(DomainError::Persistence("connection refused".into()))
        } else {
            Ok(())
        }
    }

    fn page_of(matching: Vec<Article>, page: PageRequest) -> Page<Article> {
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page() as usize)
            .collect();
        Page::new(items, total, page)
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepo {
    async fn find_all(&self, page: PageRequest) -> DomainResult<Page<Article>> {
        self.check()?;
        let all = self.articles.lock().unwrap().clone();
        Ok(Self::page_of(all, page))
    }

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        self.check()?;
        if !id.is_set() {
            return Ok(None);
        }
        let articles = self.articles.lock().unwrap();
        Ok(articles.iter().find(|a| a.id == id).cloned())
    }

    async fn save(&self, article: &mut Article) -> DomainResult<()> {
        self.check()?;
        let mut articles = self.articles.lock().unwrap();
        let now = super::time::fixed_now();
        match article.id.as_i64() {
            None => {
                let id = ArticleId::new(articles.len() as i64 + 1)?;
                article.mark_stored(id, now);
                articles.push(article.clone());
            }
            Some(_) => {
                let slot = articles
                    .iter_mut()
                    .find(|a| a.id == article.id)
                    .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
                article.mark_stored(article.id, now);
                *slot = article.clone();
            }
        }
        Ok(())
    }

    async fn search_by_title_or_content(
        &self,
        query: &str,
        page: PageRequest,
    ) -> DomainResult<Page<Article>> {
        self.check()?;
        let needle = query.to_lowercase();
        let matching = self
            .articles
            .lock()
            .unwrap()
            .iter()
            .filter(|a| {
                a.title.to_lowercase().contains(&needle)
                    || a.content.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Ok(Self::page_of(matching, page))
    }
}
