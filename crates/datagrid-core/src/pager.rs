//! Pagination of query results

use serde::Serialize;
use serde_json::Value;

use crate::error::{QueryHandlerError, QueryHandlerResult};

/// A single page of results returned by a query handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pager {
	items: Vec<Value>,
	current_page: usize,
	per_page: usize,
	total_items: usize,
}

impl Pager {
	/// Creates a page of results.
	///
	/// # Errors
	///
	/// Returns [`QueryHandlerError::InvalidPagination`] when `per_page` or
	/// `current_page` is zero, or when `current_page` is past the last page.
	///
	/// # Examples
	///
	/// ```
	/// use datagrid_core::Pager;
	/// use serde_json::json;
	///
	/// let pager = Pager::new(vec![json!(1), json!(2)], 2, 2, 5).unwrap();
	/// assert_eq!(pager.total_pages(), 3);
	/// assert_eq!(pager.start_index(), 3);
	/// assert_eq!(pager.end_index(), 4);
	///
	/// assert!(Pager::new(vec![], 0, 10, 5).is_err());
	/// ```
	pub fn new(
		items: Vec<Value>,
		current_page: usize,
		per_page: usize,
		total_items: usize,
	) -> QueryHandlerResult<Self> {
		if per_page == 0 {
			return Err(QueryHandlerError::InvalidPagination(
				"page size must be greater than zero".to_string(),
			));
		}
		if current_page == 0 {
			return Err(QueryHandlerError::InvalidPagination(
				"page numbers start at 1".to_string(),
			));
		}
		let pager = Self {
			items,
			current_page,
			per_page,
			total_items,
		};
		if current_page > pager.total_pages().max(1) {
			return Err(QueryHandlerError::InvalidPagination(format!(
				"page {} is out of range (last page is {})",
				current_page,
				pager.total_pages().max(1)
			)));
		}
		Ok(pager)
	}

	/// Items of the current page.
	pub fn items(&self) -> &[Value] {
		&self.items
	}

	/// Current page number (1-indexed).
	pub fn current_page(&self) -> usize {
		self.current_page
	}

	/// Number of items per page.
	pub fn per_page(&self) -> usize {
		self.per_page
	}

	/// Total number of items across all pages.
	pub fn total_items(&self) -> usize {
		self.total_items
	}

	/// Total number of pages.
	pub fn total_pages(&self) -> usize {
		self.total_items.div_ceil(self.per_page)
	}

	/// Returns true if there is a next page.
	pub fn has_next(&self) -> bool {
		self.current_page < self.total_pages()
	}

	/// Returns true if there is a previous page.
	pub fn has_previous(&self) -> bool {
		self.current_page > 1
	}

	/// Number of the next page, if any.
	pub fn next_page(&self) -> Option<usize> {
		self.has_next().then(|| self.current_page + 1)
	}

	/// Number of the previous page, if any.
	pub fn previous_page(&self) -> Option<usize> {
		self.has_previous().then(|| self.current_page - 1)
	}

	/// 1-based index of the first item on this page, 0 when empty.
	pub fn start_index(&self) -> usize {
		if self.items.is_empty() {
			0
		} else {
			(self.current_page - 1) * self.per_page + 1
		}
	}

	/// 1-based index of the last item on this page, 0 when empty.
	pub fn end_index(&self) -> usize {
		if self.items.is_empty() {
			0
		} else {
			self.start_index() + self.items.len() - 1
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn items(count: usize) -> Vec<Value> {
		(0..count).map(|i| json!(i)).collect()
	}

	#[rstest]
	fn test_middle_page_navigation() {
		let pager = Pager::new(items(10), 2, 10, 35).unwrap();

		assert_eq!(pager.total_pages(), 4);
		assert!(pager.has_next());
		assert!(pager.has_previous());
		assert_eq!(pager.next_page(), Some(3));
		assert_eq!(pager.previous_page(), Some(1));
		assert_eq!(pager.start_index(), 11);
		assert_eq!(pager.end_index(), 20);
	}

	#[rstest]
	fn test_last_page() {
		let pager = Pager::new(items(5), 4, 10, 35).unwrap();

		assert!(!pager.has_next());
		assert_eq!(pager.next_page(), None);
		assert_eq!(pager.end_index(), 35);
	}

	#[rstest]
	fn test_empty_result_set_has_first_page() {
		let pager = Pager::new(vec![], 1, 10, 0).unwrap();

		assert_eq!(pager.total_pages(), 0);
		assert!(!pager.has_next());
		assert!(!pager.has_previous());
		assert_eq!(pager.start_index(), 0);
	}

	#[rstest]
	#[case(1, 0, 10)]
	#[case(0, 10, 10)]
	#[case(3, 10, 20)]
	fn test_invalid_arguments(
		#[case] page: usize,
		#[case] per_page: usize,
		#[case] total: usize,
	) {
		let result = Pager::new(vec![], page, per_page, total);
		assert!(matches!(result, Err(QueryHandlerError::InvalidPagination(_))));
	}
}
