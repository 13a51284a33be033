//! Provider URL construction.

/// Default endpoint listing every instrument.
pub const CATALOG_URL: &str = "https://min-api.cryptocompare.com/data/all/coinlist";

/// Default endpoint for hourly OHLC history.
pub const HISTOHOUR_URL: &str = "https://min-api.cryptocompare.com/data/v2/histohour";

/// Builds the URL for one hourly history request.
///
/// The provider returns `limit + 1` samples ending at `to_ts` (inclusive).
///
/// # Example
///
/// ```
/// use coinbox_fetch::url::{HISTOHOUR_URL, histohour_url};
///
/// let url = histohour_url(HISTOHOUR_URL, "BTC", "EUR", 35, 1_577_833_200);
/// assert_eq!(
///     url,
///     "https://min-api.cryptocompare.com/data/v2/histohour?fsym=BTC&tsym=EUR&limit=35&toTs=1577833200"
/// );
/// ```
#[must_use]
pub fn histohour_url(base: &str, symbol: &str, quote: &str, limit: usize, to_ts: i64) -> String {
    format!("{base}?fsym={symbol}&tsym={quote}&limit={limit}&toTs={to_ts}")
}
