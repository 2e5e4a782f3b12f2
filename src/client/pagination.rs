/// Page-link model for the admin tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(current_page: i64, total_pages: i64) -> Self {
        let total_pages = total_pages.max(0);
        Self {
            current_page: current_page.clamp(1, total_pages.max(1)),
            total_pages,
        }
    }

    /// The page links to render, 1..=total_pages.
    pub fn pages(&self) -> Vec<i64> {
        (1..=self.total_pages).collect()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_pages_renders_links_and_disables_prev() {
        let p = Pagination::new(1, 3);
        assert_eq!(p.pages(), vec![1, 2, 3]);
        assert!(!p.has_prev());
        assert!(p.has_next());
    }

    #[test]
    fn test_last_page_disables_next() {
        let p = Pagination::new(3, 3);
        assert!(p.has_prev());
        assert!(!p.has_next());
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        assert_eq!(Pagination::new(9, 3).current_page, 3);
        assert_eq!(Pagination::new(0, 3).current_page, 1);
    }

    #[test]
    fn test_no_results() {
        let p = Pagination::new(1, 0);
        assert!(p.pages().is_empty());
        assert!(!p.has_prev());
        assert!(!p.has_next());
    }
}
