use crate::errors::CoreError;
use crate::models::coin::CoinSummary;
use crate::models::settings::Settings;
use crate::providers::traits::MarketDataProvider;
use crate::services::fetch::{FetchState, Fetcher};
use crate::services::market_list::{MarketListModel, MarketPage, MarketStats};
use crate::storage::backend::KeyValueStorage;
use crate::storage::watchlist::WatchlistStore;

/// A listing request: (currency, coins per request).
pub type ListingKey = (String, u32);

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRow {
    pub coin: CoinSummary,
    pub watched: bool,
}

/// The default view: searchable, sortable, paginated market table.
///
/// A failed listing is a full-page error; [`MarketScreen::reload`] is the
/// retry action.
pub struct MarketScreen<'a> {
    provider: &'a dyn MarketDataProvider,
    settings: &'a Settings,
    watchlist: WatchlistStore<'a>,
    listing: Fetcher<ListingKey, Vec<CoinSummary>>,
    model: MarketListModel,
}

impl<'a> MarketScreen<'a> {
    /// Read the watchlist and fetch the listing.
    pub async fn mount(
        provider: &'a dyn MarketDataProvider,
        settings: &'a Settings,
        storage: &'a dyn KeyValueStorage,
    ) -> MarketScreen<'a> {
        let mut screen = Self {
            provider,
            settings,
            watchlist: WatchlistStore::load(storage),
            listing: Fetcher::new(),
            model: MarketListModel::new(settings.page_size),
        };
        screen.reload().await;
        screen
    }

    /// Re-run the listing request. The query (search/sort/filter/page) is kept.
    pub async fn reload(&mut self) {
        let currency = self.settings.vs_currency.clone();
        let per_page = self.settings.listing_per_page;
        let provider = self.provider;

        let state = self
            .listing
            .run(
                (currency.clone(), per_page),
                provider.get_markets(&currency, per_page, 1),
            )
            .await;

        match state.data() {
            Some(coins) => self.model.set_coins(coins.clone()),
            None => self.model.set_coins(Vec::new()),
        }
    }

    pub fn state(&self) -> &FetchState<Vec<CoinSummary>> {
        self.listing.state()
    }

    /// Search/sort/filter/page controls.
    pub fn model_mut(&mut self) -> &mut MarketListModel {
        &mut self.model
    }

    pub fn model(&self) -> &MarketListModel {
        &self.model
    }

    pub fn page(&mut self) -> &MarketPage {
        self.model.page()
    }

    pub fn stats(&self) -> MarketStats {
        self.model.stats()
    }

    /// Rows of the current page with their watch flag.
    pub fn rows(&mut self) -> Vec<MarketRow> {
        let watchlist = &self.watchlist;
        self.model
            .page()
            .items
            .iter()
            .map(|coin| MarketRow {
                watched: watchlist.contains(&coin.id),
                coin: coin.clone(),
            })
            .collect()
    }

    pub fn is_watched(&self, id: &str) -> bool {
        self.watchlist.contains(id)
    }

    pub fn toggle_watch(&mut self, id: &str) -> Result<bool, CoreError> {
        self.watchlist.toggle(id)
    }

    pub fn watchlist(&self) -> &WatchlistStore<'a> {
        &self.watchlist
    }
}
