use crate::errors::CoreError;
use crate::models::coin::CoinSummary;
use crate::models::settings::Settings;
use crate::providers::traits::MarketDataProvider;
use crate::services::fetch::{FetchState, Fetcher};
use crate::storage::backend::KeyValueStorage;
use crate::storage::watchlist::WatchlistStore;

/// Market rows for every watched coin, ordered by upstream rank.
pub struct WatchlistScreen<'a> {
    provider: &'a dyn MarketDataProvider,
    settings: &'a Settings,
    watchlist: WatchlistStore<'a>,
    coins: Fetcher<Vec<String>, Vec<CoinSummary>>,
}

impl<'a> WatchlistScreen<'a> {
    /// Read the watchlist and fetch its coins. An empty watchlist issues no request.
    pub async fn mount(
        provider: &'a dyn MarketDataProvider,
        settings: &'a Settings,
        storage: &'a dyn KeyValueStorage,
    ) -> WatchlistScreen<'a> {
        let mut screen = Self {
            provider,
            settings,
            watchlist: WatchlistStore::load(storage),
            coins: Fetcher::new(),
        };
        screen.reload().await;
        screen
    }

    pub async fn reload(&mut self) {
        let ids = self.watchlist.ids().to_vec();
        if ids.is_empty() {
            let ticket = self.coins.begin(ids);
            self.coins.complete(ticket, Ok(Vec::new()));
            return;
        }

        let provider = self.provider;
        let currency = self.settings.vs_currency.clone();
        let request = async {
            let mut coins = provider.get_markets_by_ids(&currency, &ids).await?;
            coins.sort_by_key(CoinSummary::sort_rank);
            Ok::<_, CoreError>(coins)
        };
        let ticket = self.coins.begin(ids.clone());
        let result = request.await;
        self.coins.complete(ticket, result);
    }

    pub fn state(&self) -> &FetchState<Vec<CoinSummary>> {
        self.coins.state()
    }

    pub fn ids(&self) -> &[String] {
        self.watchlist.ids()
    }

    pub fn is_empty(&self) -> bool {
        self.watchlist.is_empty()
    }

    /// Drop `id` from the watchlist and from the rows on screen.
    pub fn remove(&mut self, id: &str) -> Result<bool, CoreError> {
        let removed = self.watchlist.remove(id)?;
        if let Some(coins) = self.coins.state_mut().data_mut() {
            coins.retain(|c| c.id != id);
        }
        Ok(removed)
    }
}
