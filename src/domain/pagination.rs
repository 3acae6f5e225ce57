//! Page-annotated result envelope

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u32,
    pub page_size: u32,
    /// Only known when the source exposes a last-page indicator
    pub total: Option<u64>,
    pub total_pages: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    /// Single page without totals
    pub fn page(data: Vec<T>, current_page: u32, page_size: u32) -> Self {
        Self {
            data,
            meta: PageMeta {
                current_page,
                page_size,
                total: None,
                total_pages: None,
            },
        }
    }

    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.meta.total_pages = Some(total_pages);
        self
    }
}
