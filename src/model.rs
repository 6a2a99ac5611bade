use serde::{Deserialize, Serialize};

/// One coin row as returned by the CoinMarketCap listings endpoint.
///
/// Upstream sends far more fields than these; everything not listed here is
/// ignored during decoding. A fetched list wholly replaces the previous one.
#[derive(Debug, Clone, Deserialize)]
pub struct Coin {
    pub id: u64,
    pub name: String,
    pub symbol: String,
    pub cmc_rank: u32,
    pub quote: Quote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Quote {
    #[serde(rename = "USD")]
    pub usd: UsdQuote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsdQuote {
    pub price: f64,
    pub percent_change_24h: f64,
}

impl Coin {
    pub fn price(&self) -> f64 {
        self.quote.usd.price
    }

    pub fn change_24h(&self) -> f64 {
        self.quote.usd.percent_change_24h
    }
}

/// Envelope wrapping the listings payload: `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
pub struct ListingsResponse {
    pub data: Vec<Coin>,
}

/// Body the proxy returns on any upstream failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_listings_payload() {
        let sample = r#"{
            "data": [
                {
                    "id": 1,
                    "name": "Bitcoin",
                    "symbol": "BTC",
                    "cmc_rank": 1,
                    "quote": {
                        "USD": {
                            "price": 50000.105,
                            "percent_change_24h": 2.345
                        }
                    }
                }
            ],
            "status": { "error_code": 0 }
        }"#;

        let listings: ListingsResponse = serde_json::from_str(sample).unwrap();

        assert_eq!(listings.data.len(), 1);
        let coin = &listings.data[0];
        assert_eq!(coin.id, 1);
        assert_eq!(coin.name, "Bitcoin");
        assert_eq!(coin.symbol, "BTC");
        assert_eq!(coin.cmc_rank, 1);
        assert!((coin.price() - 50000.105).abs() < 1e-9);
        assert!((coin.change_24h() - 2.345).abs() < 1e-9);
    }

    #[test]
    fn extra_coin_fields_are_ignored() {
        let sample = r#"{
            "data": [
                {
                    "id": 1027,
                    "name": "Ethereum",
                    "symbol": "ETH",
                    "slug": "ethereum",
                    "cmc_rank": 2,
                    "circulating_supply": 120000000,
                    "quote": {
                        "USD": {
                            "price": 3000.0,
                            "percent_change_24h": -1.5,
                            "market_cap": 360000000000.0
                        }
                    }
                }
            ]
        }"#;

        let listings: ListingsResponse = serde_json::from_str(sample).unwrap();
        assert_eq!(listings.data[0].symbol, "ETH");
        assert!(listings.data[0].change_24h() < 0.0);
    }

    #[test]
    fn error_body_serializes_to_fixed_shape() {
        let body = ErrorBody {
            error: "Error fetching data from CoinMarketCap".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"error":"Error fetching data from CoinMarketCap"}"#
        );
    }
}
