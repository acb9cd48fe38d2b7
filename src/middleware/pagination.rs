use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// `?page=&limit=` for list requests. Never rejects: a value that is missing,
/// unparsable or below 1 falls back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn from_query(query: Option<&str>) -> Self {
        let mut page = None;
        let mut limit = None;

        if let Some(qs) = query {
            // first occurrence of each key wins
            for (k, v) in url::form_urlencoded::parse(qs.as_bytes()) {
                match k.as_ref() {
                    "page" if page.is_none() => page = Some(v.into_owned()),
                    "limit" if limit.is_none() => limit = Some(v.into_owned()),
                    _ => {}
                }
            }
        }

        Self {
            page: positive_or(page.as_deref(), DEFAULT_PAGE),
            limit: positive_or(limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

fn positive_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(default)
}

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_query(parts.uri.query()))
    }
}
