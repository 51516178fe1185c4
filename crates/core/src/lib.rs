pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;
pub mod views;

use models::chart::DayRange;
use models::settings::Settings;
use providers::traits::MarketDataProvider;
use storage::backend::KeyValueStorage;
use storage::watchlist::WatchlistStore;
use views::{detail::CoinScreen, market::MarketScreen, watchlist::WatchlistScreen};

use errors::CoreError;

/// Main entry point for the crypto-dash core library.
/// Holds the configuration plus the two collaborators every view needs:
/// the market-data API and the durable storage behind the watchlist.
#[must_use]
pub struct CryptoDash {
    settings: Settings,
    provider: Box<dyn MarketDataProvider>,
    storage: Box<dyn KeyValueStorage>,
}

impl std::fmt::Debug for CryptoDash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoDash")
            .field("settings", &self.settings)
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl CryptoDash {
    /// CoinGecko + a file-backed watchlist under `settings.data_dir` (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let provider = providers::coingecko::CoinGeckoProvider::from_settings(&settings);
        let storage = storage::backend::FileStorage::new(settings.data_dir.clone());
        Self::with_parts(settings, Box::new(provider), Box::new(storage))
    }

    /// Assemble from explicit collaborators (WASM hosts, tests).
    pub fn with_parts(
        settings: Settings,
        provider: Box<dyn MarketDataProvider>,
        storage: Box<dyn KeyValueStorage>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self {
            settings,
            provider,
            storage,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Mount the market list (default view).
    pub async fn open_market(&self) -> MarketScreen<'_> {
        MarketScreen::mount(self.provider.as_ref(), &self.settings, self.storage.as_ref()).await
    }

    /// Mount the detail view for `id` with the default 7-day chart.
    pub async fn open_coin(&self, id: &str) -> CoinScreen<'_> {
        self.open_coin_with_range(id, DayRange::default()).await
    }

    pub async fn open_coin_with_range(&self, id: &str, range: DayRange) -> CoinScreen<'_> {
        CoinScreen::mount(
            self.provider.as_ref(),
            &self.settings,
            self.storage.as_ref(),
            id,
            range,
        )
        .await
    }

    /// Mount the watchlist view.
    pub async fn open_watchlist(&self) -> WatchlistScreen<'_> {
        WatchlistScreen::mount(self.provider.as_ref(), &self.settings, self.storage.as_ref()).await
    }

    // ── Watchlist ───────────────────────────────────────────────────

    /// A fresh read of the persisted watchlist.
    pub fn watchlist(&self) -> WatchlistStore<'_> {
        WatchlistStore::load(self.storage.as_ref())
    }

    /// Toggle `id` without mounting a view. Returns whether it is now watched.
    pub fn toggle_watch(&self, id: &str) -> Result<bool, CoreError> {
        self.watchlist().toggle(id)
    }
}
