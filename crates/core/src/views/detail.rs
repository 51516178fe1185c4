use crate::errors::CoreError;
use crate::models::chart::{DayRange, PriceSeries};
use crate::models::coin::CoinDetail;
use crate::models::settings::Settings;
use crate::providers::traits::MarketDataProvider;
use crate::services::fetch::{FetchState, Fetcher};
use crate::storage::backend::KeyValueStorage;
use crate::storage::watchlist::WatchlistStore;

/// What the chart area shows. A failed chart never blocks the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartPanel<'s> {
    Loading,
    Ready(&'s PriceSeries),
    /// Inline "failed to load" placeholder.
    Failed(&'s str),
}

/// Detail page for one coin: header, stats, description and price chart.
///
/// A failed detail request is a full-page error with no retry besides
/// navigating back. Chart failures stay inside [`ChartPanel::Failed`].
pub struct CoinScreen<'a> {
    provider: &'a dyn MarketDataProvider,
    settings: &'a Settings,
    watchlist: WatchlistStore<'a>,
    id: String,
    range: DayRange,
    detail: Fetcher<String, CoinDetail>,
    chart: Fetcher<(String, DayRange), PriceSeries>,
}

impl<'a> CoinScreen<'a> {
    /// Read the watchlist, then fetch detail and the default-range chart.
    pub async fn mount(
        provider: &'a dyn MarketDataProvider,
        settings: &'a Settings,
        storage: &'a dyn KeyValueStorage,
        id: &str,
        range: DayRange,
    ) -> CoinScreen<'a> {
        let mut screen = Self {
            provider,
            settings,
            watchlist: WatchlistStore::load(storage),
            id: id.to_string(),
            range,
            detail: Fetcher::new(),
            chart: Fetcher::new(),
        };
        screen.load_detail().await;
        screen.load_chart().await;
        screen
    }

    async fn load_detail(&mut self) {
        let provider = self.provider;
        let currency = self.settings.vs_currency.clone();
        let id = self.id.clone();
        self.detail
            .run(id.clone(), provider.get_coin_detail(&id, &currency))
            .await;
    }

    async fn load_chart(&mut self) {
        let provider = self.provider;
        let currency = self.settings.vs_currency.clone();
        let (id, range) = (self.id.clone(), self.range);
        self.chart
            .run(
                (id.clone(), range),
                provider.get_price_series(&id, &currency, range),
            )
            .await;
    }

    /// Switch the chart window. Only a changed key triggers a request.
    pub async fn select_range(&mut self, range: DayRange) {
        self.range = range;
        if self.chart.needs_fetch(&(self.id.clone(), range)) {
            self.load_chart().await;
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn range(&self) -> DayRange {
        self.range
    }

    pub fn detail(&self) -> &FetchState<CoinDetail> {
        self.detail.state()
    }

    pub fn chart_state(&self) -> &FetchState<PriceSeries> {
        self.chart.state()
    }

    /// Direct access for hosts that issue chart requests themselves
    /// (begin/complete) instead of awaiting [`CoinScreen::select_range`].
    pub fn chart_fetcher_mut(&mut self) -> &mut Fetcher<(String, DayRange), PriceSeries> {
        &mut self.chart
    }

    pub fn chart_panel(&self) -> ChartPanel<'_> {
        match self.chart.state() {
            FetchState::Success(series) => ChartPanel::Ready(series),
            FetchState::Error(message) => ChartPanel::Failed(message),
            FetchState::Idle | FetchState::Loading => ChartPanel::Loading,
        }
    }

    pub fn is_watched(&self) -> bool {
        self.watchlist.contains(&self.id)
    }

    pub fn toggle_watch(&mut self) -> Result<bool, CoreError> {
        let id = self.id.clone();
        self.watchlist.toggle(&id)
    }
}
