use tracing::warn;

use crate::portfolio::PortfolioEntry;
use crate::stocks::PriceOutcome;

/// Shares purchasable for one ticker. `None` means no usable price.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub ticker: String,
    pub shares_open: Option<f64>,
    pub shares_close: Option<f64>,
}

/// Shares `amount` buys at `price`, if the price is a positive finite number
/// and the quotient is finite too.
pub fn shares_for(amount: f64, price: Option<f64>) -> Option<f64> {
    match price {
        Some(p) if p.is_finite() && p > 0.0 => Some(amount / p).filter(|s| s.is_finite()),
        _ => None,
    }
}

pub fn allocate(entry: &PortfolioEntry, investment_amount: f64, outcome: &PriceOutcome) -> Allocation {
    let amount_to_invest = investment_amount * entry.weight;

    let (shares_open, shares_close) = match outcome {
        Ok(prices) => {
            let open = shares_for(amount_to_invest, prices.open);
            let close = shares_for(amount_to_invest, prices.close);
            if open.is_none() || close.is_none() {
                warn!(
                    "[ALLOC] Invalid price for {}: open={:?} close={:?}",
                    entry.ticker, prices.open, prices.close
                );
            }
            (open, close)
        }
        Err(_) => (None, None),
    };

    Allocation {
        ticker: entry.ticker.clone(),
        shares_open,
        shares_close,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::stocks::DailyPrice;

    fn entry(ticker: &str, weight: f64) -> PortfolioEntry {
        PortfolioEntry {
            ticker: ticker.to_string(),
            weight,
        }
    }

    fn prices(open: f64, close: f64) -> PriceOutcome {
        Ok(DailyPrice {
            open: Some(open),
            close: Some(close),
        })
    }

    #[test]
    fn divides_weighted_amount_by_price() {
        let a = allocate(&entry("ABC", 0.6), 1000.0, &prices(10.0, 12.0));
        assert_eq!(a.shares_open, Some(60.0));
        assert_eq!(a.shares_close, Some(50.0));
    }

    #[test]
    fn zero_open_only_nulls_open() {
        let a = allocate(&entry("ABC", 0.5), 1000.0, &prices(0.0, 25.0));
        assert_eq!(a.shares_open, None);
        assert_eq!(a.shares_close, Some(20.0));
    }

    #[test]
    fn failed_fetch_nulls_both() {
        let a = allocate(&entry("XYZ", 0.4), 1000.0, &Err(FetchError::NoData));
        assert_eq!(a.ticker, "XYZ");
        assert_eq!(a.shares_open, None);
        assert_eq!(a.shares_close, None);
    }

    #[test]
    fn unusable_prices_are_null() {
        assert_eq!(shares_for(100.0, None), None);
        assert_eq!(shares_for(100.0, Some(-4.0)), None);
        assert_eq!(shares_for(100.0, Some(f64::NAN)), None);
        assert_eq!(shares_for(100.0, Some(f64::INFINITY)), None);
        assert_eq!(shares_for(100.0, Some(8.0)), Some(12.5));
    }

    #[test]
    fn non_finite_share_counts_are_null() {
        assert_eq!(shares_for(f64::NAN, Some(10.0)), None);
        assert_eq!(shares_for(f64::INFINITY, Some(10.0)), None);
        assert_eq!(shares_for(f64::MAX, Some(f64::MIN_POSITIVE)), None);

        let a = allocate(&entry("ABC", f64::NAN), 1000.0, &prices(10.0, 12.0));
        assert_eq!(a.shares_open, None);
        assert_eq!(a.shares_close, None);
    }

    #[test]
    fn weights_over_one_are_used_as_given() {
        let a = allocate(&entry("ABC", 1.5), 1000.0, &prices(10.0, 10.0));
        assert_eq!(a.shares_open, Some(150.0));
    }
}
