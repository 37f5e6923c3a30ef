//! List pagination bounds

use shared::request::PageQuery;

use super::error::{AppError, AppResult};

/// Validated pagination parameters: page >= 1, limit in [1, 100].
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    pub fn from_query(query: &PageQuery) -> AppResult<Self> {
        let page = query.page.unwrap_or(1);
        let limit = query.limit.unwrap_or(20);
        if page < 1 || !(1..=100).contains(&limit) {
            return Err(AppError::validation(
                "page must be >= 1 and limit must be between 1 and 100",
            ));
        }
        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<i64>, limit: Option<i64>) -> PageQuery {
        PageQuery { page, limit, status: None, table_id: None }
    }

    #[test]
    fn defaults_apply() {
        let p = PageParams::from_query(&query(None, None)).unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn rejects_out_of_bounds() {
        assert!(PageParams::from_query(&query(Some(0), None)).is_err());
        assert!(PageParams::from_query(&query(None, Some(0))).is_err());
        assert!(PageParams::from_query(&query(None, Some(101))).is_err());
    }

    #[test]
    fn offset_follows_page() {
        let p = PageParams::from_query(&query(Some(3), Some(25))).unwrap();
        assert_eq!(p.offset(), 50);
    }
}
