//! Menu Item Model
//!
//! A menu item is priced one of two ways: a flat `price`, or a list of named
//! size variants (pizza diameters). Never both, never neither. The legacy
//! `price32` / `price42` columns are still read and exported but every
//! successful write clears them.

use super::serde_helpers::{bool_false, bool_true, double_option};
use crate::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, ValidationErrors};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// Menu category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Pizza,
    Pasta,
    Salad,
    Breakfast,
    Sandwich,
    MainCourse,
    Side,
    Coffee,
    Drink,
    Juice,
    FreshJuice,
    Beer,
    Wine,
    Alcohol,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Pizza,
        Category::Pasta,
        Category::Salad,
        Category::Breakfast,
        Category::Sandwich,
        Category::MainCourse,
        Category::Side,
        Category::Coffee,
        Category::Drink,
        Category::Juice,
        Category::FreshJuice,
        Category::Beer,
        Category::Wine,
        Category::Alcohol,
    ];

    /// Storage / wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pizza => "pizza",
            Self::Pasta => "pasta",
            Self::Salad => "salad",
            Self::Breakfast => "breakfast",
            Self::Sandwich => "sandwich",
            Self::MainCourse => "main_course",
            Self::Side => "side",
            Self::Coffee => "coffee",
            Self::Drink => "drink",
            Self::Juice => "juice",
            Self::FreshJuice => "fresh_juice",
            Self::Beer => "beer",
            Self::Wine => "wine",
            Self::Alcohol => "alcohol",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pizza => "Pizza",
            Self::Pasta => "Pasta",
            Self::Salad => "Salads",
            Self::Breakfast => "Breakfast",
            Self::Sandwich => "Sandwiches",
            Self::MainCourse => "Main Courses",
            Self::Side => "Sides",
            Self::Coffee => "Coffee",
            Self::Drink => "Drinks",
            Self::Juice => "Juices",
            Self::FreshJuice => "Fresh Juices",
            Self::Beer => "Beer",
            Self::Wine => "Wine",
            Self::Alcohol => "Spirits",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown menu category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// One size variant, price in RSD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSize {
    pub name: String,
    pub price: i64,
}

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: Category,
    /// Flat price (single-price items)
    pub price: Option<i64>,
    /// Deprecated, superseded by `sizes`
    pub price32: Option<i64>,
    /// Deprecated, superseded by `sizes`
    pub price42: Option<i64>,
    pub sizes: Option<Vec<ProductSize>>,
    pub image_url: Option<String>,
    pub available: bool,
    pub featured: bool,
    pub is_new: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// `sizes` as sent by clients: a JSON array, or a JSON-encoded string from
/// older dashboard builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizesInput {
    List(Vec<Value>),
    Encoded(String),
}

impl SizesInput {
    pub fn from_sizes(sizes: &[ProductSize]) -> Self {
        Self::List(
            sizes
                .iter()
                .map(|s| serde_json::json!({ "name": s.name, "price": s.price }))
                .collect(),
        )
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: Option<f64>,
    pub price32: Option<i64>,
    pub price42: Option<i64>,
    pub sizes: Option<SizesInput>,
    pub image_url: Option<String>,
    #[serde(default = "default_true", deserialize_with = "bool_true")]
    pub available: bool,
    #[serde(default, deserialize_with = "bool_false")]
    pub featured: bool,
    #[serde(default, deserialize_with = "bool_false")]
    pub is_new: bool,
}

fn default_true() -> bool {
    true
}

/// Update menu item payload
///
/// Nullable columns use `double_option`: `null` clears, absent keeps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub price32: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub price42: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub sizes: Option<Option<SizesInput>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    pub available: Option<bool>,
    pub featured: Option<bool>,
    pub is_new: Option<bool>,
}

/// Canonical pricing of a validated item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pricing {
    Flat(i64),
    Sizes(Vec<ProductSize>),
}

impl Pricing {
    /// Flat price column value
    pub fn price(&self) -> Option<i64> {
        match self {
            Self::Flat(p) => Some(*p),
            Self::Sizes(_) => None,
        }
    }

    /// Sizes column value
    pub fn sizes(&self) -> Option<&[ProductSize]> {
        match self {
            Self::Flat(_) => None,
            Self::Sizes(s) => Some(s),
        }
    }
}

/// A fully validated menu item, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemDraft {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub pricing: Pricing,
    pub image_url: Option<String>,
    pub available: bool,
    pub featured: bool,
    pub is_new: bool,
}

/// Round a client-supplied amount to whole RSD
fn round_price(value: f64) -> Option<i64> {
    if value.is_finite() {
        Some(value.round() as i64)
    } else {
        None
    }
}

/// Parse and check a sizes payload.
///
/// A structural failure is reported once and yields `None`. Per-entry
/// failures are all recorded; only valid entries are returned.
fn parse_sizes(input: &SizesInput, errs: &mut ValidationErrors) -> Option<Vec<ProductSize>> {
    let raw = match input {
        SizesInput::List(list) => list.clone(),
        SizesInput::Encoded(text) if text.trim().is_empty() => return Some(Vec::new()),
        SizesInput::Encoded(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(list)) => list,
            Ok(_) => {
                errs.add("sizes", "Sizes must be a list");
                return None;
            }
            Err(_) => {
                errs.add("sizes", "Invalid JSON format for sizes");
                return None;
            }
        },
    };

    let mut sizes = Vec::with_capacity(raw.len());
    for (index, entry) in raw.iter().enumerate() {
        let n = index + 1;
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let Some(name) = name else {
            errs.add("sizes", format!("Size {n}: name is required"));
            continue;
        };
        let Some(price) = entry.get("price").and_then(Value::as_f64) else {
            errs.add("sizes", format!("Size {n}: price must be a number"));
            continue;
        };
        match round_price(price) {
            Some(p) if p > 0 => sizes.push(ProductSize {
                name: name.to_string(),
                price: p,
            }),
            _ => errs.add("sizes", format!("Size {n}: price must be greater than 0")),
        }
    }
    Some(sizes)
}

impl MenuItemCreate {
    /// Check every invariant and normalize pricing.
    pub fn validate(&self) -> Result<MenuItemDraft, ValidationErrors> {
        let mut errs = ValidationErrors::new();

        errs.require_text(&self.name, "name", "Name", MAX_NAME_LEN);
        errs.require_text(&self.description, "description", "Description", MAX_NOTE_LEN);
        errs.optional_text(self.image_url.as_deref(), "imageUrl", "Image URL", MAX_URL_LEN);

        let category = match self.category.trim().parse::<Category>() {
            Ok(c) => Some(c),
            Err(_) => {
                errs.add("category", "Invalid category");
                None
            }
        };

        let sizes = match &self.sizes {
            Some(input) => parse_sizes(input, &mut errs),
            None => Some(Vec::new()),
        };
        let sizes_invalid = errs.has_field("sizes");

        let price = self.price.and_then(round_price).filter(|p| *p > 0);
        let has_sizes = sizes.as_ref().is_some_and(|s| !s.is_empty());
        let legacy: Vec<ProductSize> = [("32cm", self.price32), ("42cm", self.price42)]
            .into_iter()
            .filter_map(|(name, p)| {
                p.filter(|p| *p > 0).map(|price| ProductSize {
                    name: name.to_string(),
                    price,
                })
            })
            .collect();

        let pricing = match (has_sizes, price) {
            (true, Some(_)) => {
                errs.add("price", "Item cannot have both a price and sizes");
                None
            }
            (true, None) => sizes.map(Pricing::Sizes),
            (false, Some(p)) => Some(Pricing::Flat(p)),
            (false, None) if !legacy.is_empty() => Some(Pricing::Sizes(legacy)),
            (false, None) => {
                // A rejected sizes list already explains itself
                if !sizes_invalid {
                    errs.add("price", "Item must have either a price or sizes");
                }
                None
            }
        };

        errs.into_result()?;

        match (category, pricing) {
            (Some(category), Some(pricing)) => Ok(MenuItemDraft {
                name: self.name.trim().to_string(),
                description: self.description.trim().to_string(),
                category,
                pricing,
                image_url: self
                    .image_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
                available: self.available,
                featured: self.featured,
                is_new: self.is_new,
            }),
            _ => {
                let mut errs = ValidationErrors::new();
                errs.add("price", "Item must have either a price or sizes");
                Err(errs)
            }
        }
    }
}

impl MenuItemUpdate {
    /// Merge this patch onto the stored item, producing the full candidate
    /// that must pass [`MenuItemCreate::validate`] before anything is written.
    pub fn apply_to(self, current: &MenuItem) -> MenuItemCreate {
        MenuItemCreate {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            category: self
                .category
                .unwrap_or_else(|| current.category.as_str().to_string()),
            price: self
                .price
                .unwrap_or_else(|| current.price.map(|p| p as f64)),
            price32: self.price32.unwrap_or(current.price32),
            price42: self.price42.unwrap_or(current.price42),
            sizes: self.sizes.unwrap_or_else(|| {
                current
                    .sizes
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .map(SizesInput::from_sizes)
            }),
            image_url: self.image_url.unwrap_or_else(|| current.image_url.clone()),
            available: self.available.unwrap_or(current.available),
            featured: self.featured.unwrap_or(current.featured),
            is_new: self.is_new.unwrap_or(current.is_new),
        }
    }
}
