//! Query Engine: search, filtering and pagination over a department's programs.
//!
//! A record matches when its program name OR main program contains the search
//! text (case-insensitive), AND it passes the thematic area filter, AND it
//! passes the phase filter. Results keep catalog order.

use std::sync::Arc;

use serde::Serialize;

use kmc_catalog::{Catalog, Program};

/// Default programs per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default filter value meaning "no restriction".
pub const ALL: &str = "all";

/// An exact-match filter, or no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Only(String),
}

impl Filter {
    /// Interpret a raw filter value; `sentinel` means no restriction.
    pub fn parse(value: &str, sentinel: &str) -> Self {
        if value == sentinel {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn only(value: impl Into<String>) -> Self {
        Self::Only(value.into())
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

/// Search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramQuery {
    /// Substring matched against program name or main program
    pub text: String,
    /// Thematic area id filter
    pub thematic: Filter,
    /// Phase value filter
    pub phase: Filter,
    /// 1-indexed page; 0 is read as 1
    pub page: usize,
    /// Programs per page; 0 is read as 1
    pub page_size: usize,
}

impl Default for ProgramQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            thematic: Filter::All,
            phase: Filter::All,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProgramQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set search text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder: set thematic area filter.
    pub fn thematic(mut self, filter: Filter) -> Self {
        self.thematic = filter;
        self
    }

    /// Builder: set phase filter.
    pub fn phase(mut self, filter: Filter) -> Self {
        self.phase = filter;
        self
    }

    /// Builder: set page.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Builder: set page size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Whether `program` passes the text, thematic and phase predicates.
    pub fn matches(&self, program: &Program) -> bool {
        self.matches_text(program)
            && self.thematic.matches(program.thematic_area())
            && self.phase.matches(&program.project_phase().phase)
    }

    fn matches_text(&self, program: &Program) -> bool {
        if self.text.is_empty() {
            return true;
        }
        let needle = self.text.to_lowercase();
        program.program_name().to_lowercase().contains(&needle)
            || program.main_program().to_lowercase().contains(&needle)
    }

    fn effective_page(&self) -> usize {
        self.page.max(1)
    }

    fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage<'a> {
    pub items: Vec<&'a Program>,
    /// Matches across all pages
    pub total_count: usize,
    /// Never less than 1
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

impl ResultPage<'_> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `max(1, ceil(total_count / page_size))`.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size.max(1)).max(1)
}

/// Filter, search and paginate `programs`.
///
/// Pure: the same inputs always produce the same page. A page past the last
/// one is empty rather than an error.
pub fn search<'a>(programs: &'a [Program], query: &ProgramQuery) -> ResultPage<'a> {
    let page = query.effective_page();
    let page_size = query.effective_page_size();

    let matching: Vec<&Program> = programs.iter().filter(|p| query.matches(p)).collect();
    let total_count = matching.len();
    let offset = (page - 1).saturating_mul(page_size);
    let items: Vec<&Program> = matching.into_iter().skip(offset).take(page_size).collect();

    tracing::debug!(
        text = %query.text,
        total_count,
        page,
        returned = items.len(),
        "Program search"
    );

    ResultPage {
        items,
        total_count,
        total_pages: total_pages(total_count, page_size),
        page,
        page_size,
    }
}

/// Stateful browsing over one catalog.
///
/// Changing the search text or a filter always returns to page 1, so a narrower
/// result set is never viewed through a stale page number.
#[derive(Debug, Clone)]
pub struct BrowseSession {
    catalog: Arc<Catalog>,
    query: ProgramQuery,
    all_sentinel: String,
}

impl BrowseSession {
    pub fn new(catalog: Arc<Catalog>, page_size: usize) -> Self {
        Self::with_sentinel(catalog, page_size, ALL)
    }

    pub fn with_sentinel(catalog: Arc<Catalog>, page_size: usize, all_sentinel: &str) -> Self {
        Self {
            catalog,
            query: ProgramQuery::new().page_size(page_size),
            all_sentinel: all_sentinel.to_string(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &ProgramQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.query.effective_page()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
        self.query.page = 1;
    }

    /// Set the thematic filter from a raw value; the sentinel clears it.
    pub fn set_thematic(&mut self, value: &str) {
        self.query.thematic = Filter::parse(value, &self.all_sentinel);
        self.query.page = 1;
    }

    /// Set the phase filter from a raw value; the sentinel clears it.
    pub fn set_phase(&mut self, value: &str) {
        self.query.phase = Filter::parse(value, &self.all_sentinel);
        self.query.page = 1;
    }

    pub fn total_pages(&self) -> usize {
        let count = self
            .catalog
            .all_programs()
            .iter()
            .filter(|p| self.query.matches(p))
            .count();
        total_pages(count, self.query.effective_page_size())
    }

    /// Move to `page`, clamped to `1..=total_pages`.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.query.page = page.clamp(1, self.total_pages());
        self.query.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to(self.page().saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to(self.page().saturating_sub(1))
    }

    /// Run the current query.
    pub fn current(&self) -> ResultPage<'_> {
        search(self.catalog.all_programs(), &self.query)
    }
}
