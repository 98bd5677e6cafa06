use crate::config::DEFAULT_PAGE_SIZE;
use crate::models::Difficulty;

/// One filter edit. Every variant resets pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Search(String),
    Category(String),
    Difficulty(Option<Difficulty>),
    Featured(bool),
}

/// Snapshot of the filter and pagination intent behind a single fetch.
///
/// Edits never mutate in place: `with_filter` and `with_page` return a new
/// descriptor, so a descriptor handed to a fetch stays exactly as issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    search: String,
    category: String,
    difficulty: Option<Difficulty>,
    featured: bool,
    page: u32,
    page_size: u32,
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryDescriptor {
    pub fn new(page_size: u32) -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            difficulty: None,
            featured: false,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn featured(&self) -> bool {
        self.featured
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn with_filter(&self, filter: Filter) -> Self {
        let mut next = self.clone();
        match filter {
            Filter::Search(search) => next.search = search,
            Filter::Category(category) => next.category = category,
            Filter::Difficulty(difficulty) => next.difficulty = difficulty,
            Filter::Featured(featured) => next.featured = featured,
        }
        next.page = 1;
        next
    }

    /// Pages are 1-based; 0 is treated as 1.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Query-string pairs. Empty text filters mean "no constraint" and are left out.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        if !self.category.is_empty() {
            pairs.push(("category", self.category.clone()));
        }
        if let Some(difficulty) = self.difficulty {
            pairs.push(("difficulty", difficulty.as_str().to_string()));
        }
        if self.featured {
            pairs.push(("featured", "true".to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.page_size.to_string()));
        pairs
    }
}
