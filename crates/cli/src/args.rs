use anyhow::{anyhow, bail, Result};

use crypto_dash_core::models::chart::DayRange;
use crypto_dash_core::models::query::{FilterKey, SortKey};

pub const USAGE: &str = "\
usage: crypto-dash <command> [options]

commands:
  markets [--search Q] [--sort KEY] [--filter KEY] [--page N]
      sort:   market_cap_rank | price_desc | price_asc | change_desc | change_asc
      filter: all | gainers | losers
  coin <id> [--days 1|7|30|90]
  watchlist
  watch <id>        add or remove a coin from the watchlist
  help";

#[derive(Debug, PartialEq)]
pub enum Command {
    Markets {
        search: String,
        sort: SortKey,
        filter: FilterKey,
        page: usize,
    },
    Coin {
        id: String,
        range: DayRange,
    },
    Watchlist,
    Watch {
        id: String,
    },
    Help,
}

fn value_for(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<String> {
    args.next().ok_or_else(|| anyhow!("{flag} needs a value"))
}

pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Ok(Command::Markets {
            search: String::new(),
            sort: SortKey::default(),
            filter: FilterKey::default(),
            page: 1,
        });
    };

    match command.as_str() {
        "markets" => {
            let (mut search, mut sort, mut filter, mut page) =
                (String::new(), SortKey::default(), FilterKey::default(), 1);
            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--search" | "-s" => search = value_for(&flag, &mut args)?,
                    "--sort" => sort = SortKey::from_key(&value_for(&flag, &mut args)?),
                    "--filter" => filter = FilterKey::from_key(&value_for(&flag, &mut args)?),
                    "--page" | "-p" => {
                        let raw = value_for(&flag, &mut args)?;
                        page = raw
                            .parse()
                            .map_err(|_| anyhow!("--page expects a number, got '{raw}'"))?;
                    }
                    other => bail!("unknown option '{other}' for markets"),
                }
            }
            Ok(Command::Markets {
                search,
                sort,
                filter,
                page,
            })
        }
        "coin" => {
            let id = args.next().ok_or_else(|| anyhow!("coin needs an id"))?;
            let mut range = DayRange::default();
            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--days" | "-d" => range = value_for(&flag, &mut args)?.parse()?,
                    other => bail!("unknown option '{other}' for coin"),
                }
            }
            Ok(Command::Coin { id, range })
        }
        "watchlist" => Ok(Command::Watchlist),
        "watch" => {
            let id = args.next().ok_or_else(|| anyhow!("watch needs an id"))?;
            Ok(Command::Watch { id })
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => bail!("unknown command '{other}'\n\n{USAGE}"),
    }
}
