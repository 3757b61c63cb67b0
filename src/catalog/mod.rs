//! Catalog
//!
//! Restaurants, menus and customization options for the storefront. The demo
//! data ships embedded in the binary.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::lines::{CartLine, Customizations, Selection, variant_id};

const DEMO_CATALOG: &str = include_str!("demo.yml");

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog YAML could not be parsed
    #[error("failed to parse catalog: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Restaurant id not in the catalog
    #[error("restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// Menu item id not on the restaurant's menu
    #[error("menu item not found: {0}")]
    ItemNotFound(String),

    /// Selection names a category the item does not offer
    #[error("unknown customization category: {0}")]
    UnknownCategory(String),

    /// Selection names an option the category does not offer
    #[error("unknown option {option:?} for category {category:?}")]
    UnknownOption {
        /// Category id
        category: String,
        /// Option id
        option: String,
    },

    /// More than one option chosen for a single-select category
    #[error("category {0:?} allows a single option")]
    NotMultiSelect(String),

    /// Required category left without a choice
    #[error("category {0:?} requires a selection")]
    MissingRequired(String),
}

/// The full storefront catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    /// Restaurants in display order
    pub restaurants: Vec<Restaurant>,
}

/// A restaurant and its menu.
#[derive(Debug, Clone, Deserialize)]
pub struct Restaurant {
    /// Restaurant id
    pub id: String,

    /// Display name
    pub name: String,

    /// Cover image URL
    pub image: String,

    /// Cuisine tags, comma separated
    pub cuisine: String,

    /// Average rating out of five
    pub rating: Decimal,

    /// Delivery estimate, e.g. "15-25 min"
    pub delivery_time: String,

    /// Street address
    #[serde(default)]
    pub address: Option<String>,

    /// Short blurb
    #[serde(default)]
    pub description: Option<String>,

    /// Shown on the home screen
    #[serde(default)]
    pub featured: bool,

    /// Menu items
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

/// An orderable dish.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItem {
    /// Item id, unique within the restaurant
    pub id: String,

    /// Display name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Base price before customizations
    pub price: Decimal,

    /// Image URL
    pub image: String,

    /// Customization categories
    #[serde(default)]
    pub customizations: Vec<CustomizationCategory>,
}

/// A group of options, e.g. "Cheese".
#[derive(Debug, Clone, Deserialize)]
pub struct CustomizationCategory {
    /// Category id
    pub id: String,

    /// Display name
    pub name: String,

    /// A choice must be made
    #[serde(default)]
    pub required: bool,

    /// Several options may be chosen
    #[serde(default)]
    pub multiple: bool,

    /// Option chosen when the customer picks nothing (single-select only)
    #[serde(default)]
    pub default: Option<String>,

    /// Available options
    pub options: Vec<CustomizationOption>,
}

/// One option within a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomizationOption {
    /// Option id
    pub id: String,

    /// Display name
    pub name: String,

    /// Surcharge added to the unit price
    pub price: Decimal,
}

impl Catalog {
    /// The demo catalog shipped with the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded YAML is malformed.
    pub fn demo() -> Result<Self, CatalogError> {
        Self::from_yaml_str(DEMO_CATALOG)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML does not describe a catalog.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Restaurant by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RestaurantNotFound`] for unknown ids.
    pub fn restaurant(&self, id: &str) -> Result<&Restaurant, CatalogError> {
        self.restaurants
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CatalogError::RestaurantNotFound(id.to_string()))
    }

    /// Featured restaurants in display order.
    pub fn featured(&self) -> impl Iterator<Item = &Restaurant> {
        self.restaurants.iter().filter(|r| r.featured)
    }
}

impl Restaurant {
    /// Menu item by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ItemNotFound`] for unknown ids.
    pub fn item(&self, id: &str) -> Result<&MenuItem, CatalogError> {
        self.menu
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| CatalogError::ItemNotFound(id.to_string()))
    }
}

impl CustomizationCategory {
    fn option(&self, id: &str) -> Result<&CustomizationOption, CatalogError> {
        self.options
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| CatalogError::UnknownOption {
                category: self.id.clone(),
                option: id.to_string(),
            })
    }
}

impl MenuItem {
    /// Builds a cart line for this item with the given choices.
    ///
    /// Single-select categories left unset take their default. The unit price is
    /// the base price plus every selected option's surcharge, and the line id is
    /// derived from the choices so different configurations stay separate lines.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown categories or options, multiple options in a
    /// single-select category, or a required category left empty.
    pub fn configure(
        &self,
        restaurant: &Restaurant,
        selections: &Customizations,
        quantity: NonZeroU32,
    ) -> Result<CartLine, CatalogError> {
        if let Some(unknown) = selections
            .keys()
            .find(|id| !self.customizations.iter().any(|c| &c.id == *id))
        {
            return Err(CatalogError::UnknownCategory(unknown.clone()));
        }

        let mut unit_price = self.price;
        let mut customizations = Customizations::new();

        for category in &self.customizations {
            let chosen = match selections.get(&category.id) {
                Some(selection) => normalize(category, selection)?,
                None if category.multiple => Selection::Multiple(Vec::new()),
                None => match &category.default {
                    Some(default) => Selection::Single(default.clone()),
                    None if category.required => {
                        return Err(CatalogError::MissingRequired(category.id.clone()));
                    }
                    None => continue,
                },
            };

            let mut picked = 0_usize;
            for option in chosen.options() {
                unit_price += category.option(option)?.price;
                picked += 1;
            }

            if category.required && picked == 0 {
                return Err(CatalogError::MissingRequired(category.id.clone()));
            }

            customizations.insert(category.id.clone(), chosen);
        }

        let line = CartLine::new(
            variant_id(&self.id, &customizations),
            self.name.clone(),
            unit_price,
            quantity,
            self.image.clone(),
            restaurant.id.clone(),
        )
        .with_restaurant_name(restaurant.name.clone());

        Ok(if customizations.is_empty() {
            line
        } else {
            line.with_customizations(customizations)
        })
    }
}

fn normalize(
    category: &CustomizationCategory,
    selection: &Selection,
) -> Result<Selection, CatalogError> {
    match selection {
        Selection::Single(option) if category.multiple => {
            Ok(Selection::Multiple(vec![option.clone()]))
        }
        Selection::Multiple(options) if category.multiple => {
            let mut unique: Vec<String> = Vec::with_capacity(options.len());
            for option in options {
                if !unique.contains(option) {
                    unique.push(option.clone());
                }
            }
            Ok(Selection::Multiple(unique))
        }
        Selection::Single(option) => Ok(Selection::Single(option.clone())),
        Selection::Multiple(options) => match options.as_slice() {
            [option] => Ok(Selection::Single(option.clone())),
            _ => Err(CatalogError::NotMultiSelect(category.id.clone())),
        },
    }
}
