//! CS.MONEY response shapes.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// One page of sell orders.
#[derive(Debug, Deserialize)]
pub struct ListingPage {
    pub items: Vec<ListingItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingItem {
    #[serde(deserialize_with = "number_or_string")]
    pub asset_id: u64,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    pub float: f64,
    #[serde(default)]
    pub pattern: Option<u32>,
    #[serde(default)]
    pub overpay: Option<Overpay>,
}

impl ListingItem {
    /// Overpay charged for this wear value, when the market prices it.
    #[must_use]
    pub fn overpay_float(&self) -> Option<Decimal> {
        self.overpay
            .as_ref()
            .and_then(|o| o.float)
            .filter(|o| !o.is_zero())
    }
}

#[derive(Debug, Deserialize)]
pub struct Overpay {
    #[serde(default)]
    pub float: Option<Decimal>,
}

/// Price lookup for one asset.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPrice {
    pub default_price: Decimal,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flexible {
    Number(serde_json::Number),
    Text(String),
}

/// Accept `0.25` as well as `"0.25"`.
fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let text = match Flexible::deserialize(deserializer)? {
        Flexible::Number(n) => n.to_string(),
        Flexible::Text(s) => s,
    };
    text.trim().parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn float_and_asset_id_accept_strings() {
        let item: ListingItem = serde_json::from_value(json!({
            "assetId": "123",
            "fullName": "AK-47 | Redline (Field-Tested)",
            "float": "0.2512",
            "overpay": { "float": 1.5 }
        }))
        .unwrap();
        assert_eq!(item.asset_id, 123);
        assert!((item.float - 0.2512).abs() < f64::EPSILON);
        assert_eq!(item.overpay_float(), Some(dec!(1.5)));
    }

    #[test]
    fn missing_or_zero_overpay_is_none() {
        let bare: ListingItem =
            serde_json::from_value(json!({ "assetId": 1, "float": 0.1 })).unwrap();
        assert_eq!(bare.overpay_float(), None);

        let zero: ListingItem = serde_json::from_value(json!({
            "assetId": 1, "float": 0.1, "overpay": { "float": 0 }
        }))
        .unwrap();
        assert_eq!(zero.overpay_float(), None);
    }
}
