use serde::{Deserialize, Serialize};

/// 1-based page request. Without `per_page` the whole collection is one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: usize,
    pub last_page: usize,
    pub per_page: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Number of pages needed for `total` items, `ceil(total / per_page)`.
pub fn page_count(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1))
}

/// 依頁碼切割；超出範圍的頁碼回傳空集合，不視為錯誤
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let current_page = request.page.unwrap_or(1);
    // per_page = 0 視為 1，避免除以零
    let per_page = request.per_page.map(|n| n.max(1)).unwrap_or(total.max(1));
    let last_page = page_count(total, per_page).max(1);

    let data = match current_page.checked_sub(1) {
        Some(index) => items
            .into_iter()
            .skip(index.saturating_mul(per_page))
            .take(per_page)
            .collect(),
        None => Vec::new(),
    };

    Page {
        data,
        meta: PageMeta {
            current_page,
            last_page,
            per_page,
            total,
        },
    }
}
