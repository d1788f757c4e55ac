//! Limit/offset pagination.

/// Page size used when the caller asks for a non-positive limit.
pub const DEFAULT_LIMIT: i64 = 10;

/// A normalized page request: `limit > 0`, `offset >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: i64,
    offset: i64,
}

impl Pagination {
    /// Clamp raw caller input into a valid page.
    ///
    /// Non-positive limits become [`DEFAULT_LIMIT`] and negative offsets become
    /// zero. Out-of-range input is never an error.
    #[must_use]
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: if limit <= 0 { DEFAULT_LIMIT } else { limit },
            offset: offset.max(0),
        }
    }

    #[must_use]
    pub fn limit(self) -> i64 {
        self.limit
    }

    #[must_use]
    pub fn offset(self) -> i64 {
        self.offset
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_valid_values() {
        let page = Pagination::new(25, 50);
        assert_eq!(page.limit(), 25);
        assert_eq!(page.offset(), 50);
    }

    #[test]
    fn should_default_limit_when_zero_or_negative() {
        assert_eq!(Pagination::new(0, 0).limit(), DEFAULT_LIMIT);
        assert_eq!(Pagination::new(-3, 0).limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn should_clamp_negative_offset_to_zero() {
        assert_eq!(Pagination::new(5, -1).offset(), 0);
        assert_eq!(Pagination::new(5, i64::MIN).offset(), 0);
    }

    #[test]
    fn should_default_to_first_page_of_ten() {
        assert_eq!(Pagination::default(), Pagination::new(10, 0));
    }
}
