use std::cmp::Ordering;

use crate::models::coin::CoinSummary;
use crate::models::query::{FilterKey, MarketQuery, SortKey};

/// How many page buttons the pager shows.
pub const PAGER_WINDOW: usize = 5;

/// One page of the filtered, sorted market list.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketPage {
    pub items: Vec<CoinSummary>,
    /// 1-based page actually shown (after clamping).
    pub page: usize,
    /// `ceil(total_filtered / page_size)`; 0 when nothing matches.
    pub total_pages: usize,
    pub total_filtered: usize,
    pub page_size: usize,
}

impl MarketPage {
    /// 1-based index of the first row on this page, 0 when empty.
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last row on this page, 0 when empty.
    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page buttons rendered by the pager: the first five pages at most.
    pub fn pager_window(&self) -> Vec<usize> {
        (1..=self.total_pages.min(PAGER_WINDOW)).collect()
    }

    /// "Showing X to Y of Z coins"
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} coins",
            self.first_index(),
            self.last_index(),
            self.total_filtered
        )
    }
}

/// Counts shown above the table, over the unfiltered source list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarketStats {
    pub total: usize,
    pub gainers: usize,
    pub losers: usize,
}

impl MarketStats {
    pub fn from_coins(coins: &[CoinSummary]) -> Self {
        Self {
            total: coins.len(),
            gainers: coins.iter().filter(|c| c.is_gainer()).count(),
            losers: coins.iter().filter(|c| c.is_loser()).count(),
        }
    }
}

/// Number of pages needed for `count` rows.
pub fn page_count(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Clamp a requested page into `[1, total_pages]` (1 when there are no pages).
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Search + gainers/losers filter, preserving source order.
pub fn filter_coins<'a>(
    coins: &'a [CoinSummary],
    search: &str,
    filter: FilterKey,
) -> Vec<&'a CoinSummary> {
    let needle = search.to_lowercase();
    coins
        .iter()
        .filter(|c| c.matches(&needle))
        .filter(|c| match filter {
            FilterKey::All => true,
            FilterKey::Gainers => c.is_gainer(),
            FilterKey::Losers => c.is_loser(),
        })
        .collect()
}

fn compare(a: &CoinSummary, b: &CoinSummary, sort: SortKey) -> Ordering {
    match sort {
        SortKey::MarketCapRank => a.sort_rank().cmp(&b.sort_rank()),
        SortKey::PriceAsc => a.current_price.total_cmp(&b.current_price),
        SortKey::PriceDesc => b.current_price.total_cmp(&a.current_price),
        SortKey::ChangeAsc => a
            .price_change_percentage_24h
            .total_cmp(&b.price_change_percentage_24h),
        SortKey::ChangeDesc => b
            .price_change_percentage_24h
            .total_cmp(&a.price_change_percentage_24h),
    }
}

/// Stable sort: ties keep their relative source order.
pub fn sort_coins(coins: &mut [&CoinSummary], sort: SortKey) {
    coins.sort_by(|a, b| compare(a, b, sort));
}

/// Filter → sort → paginate.
pub fn apply_query(coins: &[CoinSummary], query: &MarketQuery, page_size: usize) -> MarketPage {
    let mut filtered = filter_coins(coins, &query.search, query.filter);
    sort_coins(&mut filtered, query.sort);

    let total_filtered = filtered.len();
    let total_pages = page_count(total_filtered, page_size);
    let page = clamp_page(query.page, total_pages);

    let items = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    MarketPage {
        items,
        page,
        total_pages,
        total_filtered,
        page_size,
    }
}

/// Owns the source list and the query; memoizes the derived page.
///
/// Any change to the source list, search, sort or filter drops the
/// memoized page; it is recomputed from scratch on the next read.
#[derive(Debug, Clone)]
pub struct MarketListModel {
    coins: Vec<CoinSummary>,
    query: MarketQuery,
    page_size: usize,
    derived: Option<MarketPage>,
}

impl MarketListModel {
    pub fn new(page_size: usize) -> Self {
        Self {
            coins: Vec::new(),
            query: MarketQuery::default(),
            page_size: page_size.max(1),
            derived: None,
        }
    }

    pub fn with_coins(coins: Vec<CoinSummary>, page_size: usize) -> Self {
        let mut model = Self::new(page_size);
        model.coins = coins;
        model
    }

    pub fn coins(&self) -> &[CoinSummary] {
        &self.coins
    }

    pub fn query(&self) -> &MarketQuery {
        &self.query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn stats(&self) -> MarketStats {
        MarketStats::from_coins(&self.coins)
    }

    pub fn set_coins(&mut self, coins: Vec<CoinSummary>) {
        self.coins = coins;
        self.derived = None;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.query.search {
            self.query.search = search;
            self.derived = None;
        }
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        if sort != self.query.sort {
            self.query.sort = sort;
            self.derived = None;
        }
    }

    pub fn set_filter(&mut self, filter: FilterKey) {
        if filter != self.query.filter {
            self.query.filter = filter;
            self.derived = None;
        }
    }

    /// Request a page; the rendered page is clamped on the next read.
    pub fn set_page(&mut self, page: usize) {
        if page != self.query.page {
            self.query.page = page;
            self.derived = None;
        }
    }

    pub fn next_page(&mut self) {
        let current = self.page().page;
        let total = self.page().total_pages;
        self.set_page(clamp_page(current + 1, total));
    }

    pub fn previous_page(&mut self) {
        let current = self.page().page;
        self.set_page(current.saturating_sub(1).max(1));
    }

    /// The current page, recomputed if any input changed since the last read.
    pub fn page(&mut self) -> &MarketPage {
        let (coins, query, page_size) = (&self.coins, &self.query, self.page_size);
        self.derived
            .get_or_insert_with(|| apply_query(coins, query, page_size))
    }

    /// Whether a recompute is pending.
    pub fn is_stale(&self) -> bool {
        self.derived.is_none()
    }
}
