//! Cart Lines

use std::{collections::BTreeMap, fmt::Write as _, num::NonZeroU32};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Selected option(s) for a single customization category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    /// Single-select category (e.g. patty type).
    Single(String),

    /// Multi-select category (e.g. extras).
    Multiple(Vec<String>),
}

impl Selection {
    /// Iterate over the selected option ids.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        let options: &[String] = match self {
            Selection::Single(option) => std::slice::from_ref(option),
            Selection::Multiple(options) => options,
        };

        options.iter().map(String::as_str)
    }
}

/// Category id -> selected option(s).
pub type Customizations = BTreeMap<String, Selection>;

/// One line in the cart.
///
/// The unit price already includes any customization surcharge; the cart never
/// interprets `customizations`, it only carries them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Line identity. Two additions with the same id are merged.
    pub id: String,

    /// Display name
    pub name: String,

    /// Price per unit, never negative
    #[serde(rename = "price", with = "price")]
    pub unit_price: Decimal,

    /// Number of units, never zero
    pub quantity: NonZeroU32,

    /// Product image URL
    pub image: String,

    /// Owning restaurant
    pub restaurant_id: String,

    /// Owning restaurant display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,

    /// Customization choices, opaque to the cart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customizations: Option<Customizations>,
}

impl CartLine {
    /// Creates a new line without restaurant name or customizations.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: NonZeroU32,
        image: impl Into<String>,
        restaurant_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity,
            image: image.into(),
            restaurant_id: restaurant_id.into(),
            restaurant_name: None,
            customizations: None,
        }
    }

    /// Sets the restaurant display name.
    #[must_use]
    pub fn with_restaurant_name(mut self, name: impl Into<String>) -> Self {
        self.restaurant_name = Some(name.into());
        self
    }

    /// Sets the customization payload.
    #[must_use]
    pub fn with_customizations(mut self, customizations: Customizations) -> Self {
        self.customizations = Some(customizations);
        self
    }

    /// Price of the whole line (unit price times quantity).
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity.get())
    }
}

/// Prices are stored as JSON numbers written digit for digit, so a snapshot
/// reads back as the exact decimal that was saved.
mod price {
    use rust_decimal::{Decimal, serde::arbitrary_precision};
    use serde::{Deserializer, Serializer, de::Error as _};

    pub(super) fn serialize<S: Serializer>(
        price: &Decimal,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        arbitrary_precision::serialize(price, serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Decimal, D::Error> {
        let price = arbitrary_precision::deserialize(deserializer)?;

        if price < Decimal::ZERO {
            return Err(D::Error::custom(format!("negative price: {price}")));
        }

        Ok(price)
    }
}

/// Derives a stable line id for a product with the given customizations.
///
/// Equal choices always produce the same id regardless of the order options were
/// picked in, so re-adding the same configuration merges while a different one
/// becomes its own line.
pub fn variant_id(product_id: &str, customizations: &Customizations) -> String {
    let mut id = product_id.to_string();

    for (category, selection) in customizations {
        let mut options: Vec<&str> = selection.options().collect();
        options.sort_unstable();
        options.dedup();

        if options.is_empty() {
            continue;
        }

        // Writing into a String cannot fail.
        _ = write!(id, ";{category}={}", options.join(","));
    }

    id
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn one() -> NonZeroU32 {
        NonZeroU32::MIN
    }

    fn burger() -> CartLine {
        CartLine::new(
            "1",
            "Classic Cheeseburger",
            Decimal::new(12_99, 2),
            one(),
            "https://example.test/burger.jpg",
            "1",
        )
    }

    #[test]
    fn line_total_multiplies_unit_price() -> TestResult {
        let mut line = burger();
        line.quantity = NonZeroU32::new(3).ok_or("non-zero")?;

        assert_eq!(line.line_total(), Decimal::new(38_97, 2));

        Ok(())
    }

    #[test]
    fn serializes_with_storefront_field_names() -> TestResult {
        let line = burger().with_restaurant_name("Burger House");

        let json: serde_json::Value = serde_json::to_value(&line)?;

        assert_eq!(json.get("price"), Some(&serde_json::json!(12.99)));
        assert_eq!(json.get("restaurantId"), Some(&serde_json::json!("1")));
        assert_eq!(
            json.get("restaurantName"),
            Some(&serde_json::json!("Burger House"))
        );
        assert!(
            json.get("customizations").is_none(),
            "absent customizations should be omitted"
        );

        Ok(())
    }

    #[test]
    fn deserializes_mixed_selections() -> TestResult {
        let raw = r#"{
            "id": "1-x",
            "name": "Classic Cheeseburger",
            "price": 16.49,
            "quantity": 2,
            "image": "",
            "restaurantId": "1",
            "customizations": { "patty": "beef", "extras": ["bacon", "egg"] }
        }"#;

        let line: CartLine = serde_json::from_str(raw)?;
        let customizations = line.customizations.ok_or("customizations")?;

        assert_eq!(line.unit_price, Decimal::new(16_49, 2));
        assert_eq!(line.quantity.get(), 2);
        assert_eq!(
            customizations.get("patty"),
            Some(&Selection::Single("beef".to_string()))
        );
        assert_eq!(
            customizations.get("extras"),
            Some(&Selection::Multiple(vec![
                "bacon".to_string(),
                "egg".to_string()
            ]))
        );

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let raw = r#"{"id":"1","name":"x","price":1,"quantity":0,"image":"","restaurantId":"1"}"#;

        assert!(serde_json::from_str::<CartLine>(raw).is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        let raw = r#"{"id":"1","name":"x","price":-5,"quantity":1,"image":"","restaurantId":"1"}"#;

        assert!(serde_json::from_str::<CartLine>(raw).is_err());
    }

    #[test]
    fn long_fraction_price_survives_json() -> TestResult {
        let mut line = burger();
        line.unit_price = Decimal::from(10) / Decimal::from(3);

        let restored: CartLine = serde_json::from_str(&serde_json::to_string(&line)?)?;

        assert_eq!(restored.unit_price, line.unit_price);
        assert_eq!(restored, line);

        Ok(())
    }

    #[test]
    fn variant_id_without_customizations_is_product_id() {
        assert_eq!(variant_id("7", &Customizations::new()), "7");
    }

    #[test]
    fn variant_id_ignores_selection_order() {
        let mut a = Customizations::new();
        a.insert("patty".into(), Selection::Single("beef".into()));
        a.insert(
            "extras".into(),
            Selection::Multiple(vec!["egg".into(), "bacon".into()]),
        );

        let mut b = Customizations::new();
        b.insert(
            "extras".into(),
            Selection::Multiple(vec!["bacon".into(), "egg".into(), "bacon".into()]),
        );
        b.insert("patty".into(), Selection::Single("beef".into()));

        assert_eq!(variant_id("1", &a), variant_id("1", &b));
        assert_eq!(variant_id("1", &a), "1;extras=bacon,egg;patty=beef");
    }

    #[test]
    fn variant_id_skips_empty_multi_selection() {
        let mut customizations = Customizations::new();
        customizations.insert("extras".into(), Selection::Multiple(Vec::new()));
        customizations.insert("cheese".into(), Selection::Single("swiss".into()));

        assert_eq!(variant_id("1", &customizations), "1;cheese=swiss");
    }

    #[test]
    fn different_customizations_give_different_ids() {
        let mut a = Customizations::new();
        a.insert("cheese".into(), Selection::Single("swiss".into()));

        let mut b = Customizations::new();
        b.insert("cheese".into(), Selection::Single("cheddar".into()));

        assert_ne!(variant_id("1", &a), variant_id("1", &b));
    }
}
