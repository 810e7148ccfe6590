use crate::domain::errors::{DomainError, DomainResult};
use std::{fmt, str::FromStr};

/// Identifier of an article. An unset id marks an article that has not been
/// persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArticleId(Option<i64>);

impl ArticleId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "article id must be a positive integer".into(),
            ))
        } else {
            Ok(Self(Some(id)))
        }
    }

    pub const fn unset() -> Self {
        Self(None)
    }

    pub fn from_option(id: Option<i64>) -> DomainResult<Self> {
        id.map_or(Ok(Self::unset()), Self::new)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => Ok(()),
        }
    }
}

impl FromStr for ArticleId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|_| DomainError::Validation(format!("invalid article id '{s}'")))?;
        Self::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum StatusKind {
    Draft,
    Published,
}

/// Publication state of an article. Only the two named states exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArticleStatus(StatusKind);

impl ArticleStatus {
    const DRAFT: &'static str = "draft";
    const PUBLISHED: &'static str = "published";

    pub const fn draft() -> Self {
        Self(StatusKind::Draft)
    }

    pub const fn published() -> Self {
        Self(StatusKind::Published)
    }

    pub fn is_draft(&self) -> bool {
        self.0 == StatusKind::Draft
    }

    pub fn is_published(&self) -> bool {
        self.0 == StatusKind::Published
    }

    pub fn as_str(&self) -> &'static str {
        match self.0 {
            StatusKind::Draft => Self::DRAFT,
            StatusKind::Published => Self::PUBLISHED,
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::DRAFT => Ok(Self::draft()),
            Self::PUBLISHED => Ok(Self::published()),
            other => Err(DomainError::Validation(format!(
                "invalid article status: {other}"
            ))),
        }
    }
}
