use crypto_dash_core::models::chart::{DayRange, PriceSeries};
use crypto_dash_core::models::coin::CoinSummary;
use crypto_dash_core::services::fetch::FetchState;
use crypto_dash_core::services::format::{
    format_currency, format_large_number, format_optional_supply, format_percent, format_supply,
    summarize_description,
};
use crypto_dash_core::views::detail::{ChartPanel, CoinScreen};
use crypto_dash_core::views::market::MarketScreen;
use crypto_dash_core::views::watchlist::WatchlistScreen;

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 60;

fn star(watched: bool) -> char {
    if watched {
        '★'
    } else {
        '☆'
    }
}

fn rank(rank: Option<u32>) -> String {
    rank.map(|r| r.to_string()).unwrap_or_else(|| "-".into())
}

fn header() {
    println!(
        "{:<2} {:>5}  {:<24} {:>16} {:>9} {:>12} {:>12}",
        "", "#", "Coin", "Price", "24h", "Market Cap", "Volume"
    );
}

fn row(watched: bool, c: &CoinSummary) {
    let label = format!("{} ({})", c.name, c.symbol.to_uppercase());
    println!(
        "{:<2} {:>5}  {:<24} {:>16} {:>9} {:>12} {:>12}",
        star(watched),
        rank(c.market_cap_rank),
        label,
        format_currency(c.current_price),
        format_percent(c.price_change_percentage_24h),
        format_large_number(c.market_cap),
        format_large_number(c.total_volume),
    );
}

pub fn market(screen: &mut MarketScreen<'_>) {
    let stats = screen.stats();
    println!(
        "Total coins: {}   Gainers (24h): {}   Losers (24h): {}",
        stats.total, stats.gainers, stats.losers
    );
    let query = screen.model().query().clone();
    println!(
        "Sort: {}   Filter: {}   Search: {}\n",
        query.sort,
        query.filter,
        if query.search.is_empty() { "-" } else { query.search.as_str() }
    );

    let rows = screen.rows();
    if rows.is_empty() {
        println!("No cryptocurrencies found matching your criteria.");
        return;
    }

    header();
    for r in &rows {
        row(r.watched, &r.coin);
    }

    let page = screen.page();
    if page.total_pages > 1 {
        let pager: Vec<String> = page
            .pager_window()
            .into_iter()
            .map(|p| if p == page.page { format!("[{p}]") } else { p.to_string() })
            .collect();
        let more = if page.total_pages > pager.len() { " …" } else { "" };
        println!("\n{}   page {}{}", page.summary(), pager.join(" "), more);
    }
}

fn sparkline(series: &PriceSeries) -> String {
    let Some((lo, hi)) = series.min_max() else {
        return String::new();
    };
    let step = (series.len() as f64 / SPARK_WIDTH as f64).max(1.0);
    let span = hi - lo;
    (0..series.len().min(SPARK_WIDTH))
        .filter_map(|i| series.points.get((i as f64 * step) as usize))
        .map(|p| {
            if span <= 0.0 {
                SPARK[SPARK.len() / 2]
            } else {
                let idx = ((p.price - lo) / span * (SPARK.len() - 1) as f64).round() as usize;
                SPARK[idx.min(SPARK.len() - 1)]
            }
        })
        .collect()
}

pub fn coin(screen: &CoinScreen<'_>) {
    let FetchState::Success(coin) = screen.detail() else {
        return;
    };

    println!(
        "{} {} ({})   Rank #{}",
        star(screen.is_watched()),
        coin.name,
        coin.symbol.to_uppercase(),
        rank(coin.market_cap_rank)
    );
    println!(
        "{}   {} (24h)\n",
        format_currency(coin.current_price),
        format_percent(coin.price_change_percentage_24h)
    );

    let ranges: Vec<String> = DayRange::ALL
        .iter()
        .map(|r| if *r == screen.range() { format!("[{r}]") } else { r.to_string() })
        .collect();
    println!("Price Chart   {}", ranges.join(" "));
    match screen.chart_panel() {
        ChartPanel::Ready(series) if !series.is_empty() => {
            println!("{}", sparkline(series));
            if let Some((lo, hi)) = series.min_max() {
                println!("low {}   high {}", format_currency(lo), format_currency(hi));
            }
        }
        ChartPanel::Ready(_) => println!("No chart data available"),
        ChartPanel::Loading => println!("Loading chart…"),
        ChartPanel::Failed(_) => println!("Failed to load chart data"),
    }

    println!("\nMarket Statistics");
    println!("  Market Cap           {}", format_large_number(coin.market_cap));
    println!("  24h Volume           {}", format_large_number(coin.total_volume));
    println!("  Circulating Supply   {}", format_supply(coin.circulating_supply));
    println!("  Total Supply         {}", format_optional_supply(coin.total_supply, "N/A"));
    println!("  Max Supply           {}", format_optional_supply(coin.max_supply, "∞"));

    let about = summarize_description(&coin.description);
    if !about.is_empty() {
        println!("\nAbout {}\n  {about}", coin.name);
    }
}

pub fn watchlist(screen: &WatchlistScreen<'_>) {
    let coins = match screen.state() {
        FetchState::Success(coins) => coins,
        _ => return,
    };
    if coins.is_empty() {
        println!("Your watchlist is empty. Add coins with `crypto-dash watch <id>`.");
        return;
    }

    println!("My Watchlist ({} coins)\n", coins.len());
    header();
    for c in coins {
        row(true, c);
    }
}
