//! Purchase records and the strictly typed price they carry.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Identifiable, OwnedByPerson};

/// Non-negative purchase price in minor currency units.
///
/// Deserialises only from JSON integers. Textual prices must be converted
/// explicitly through [`Price::from_str`] at ingestion time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64", into = "i64")]
pub struct Price(i64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn new(value: i64) -> Result<Self, PriceError> {
        if value < 0 {
            return Err(PriceError::Negative(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Price {
    type Error = PriceError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| PriceError::NotAnInteger(trimmed.to_string()))?;
        Price::new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    Negative(i64),
    NotAnInteger(String),
}

impl fmt::Display for PriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceError::Negative(value) => write!(f, "price must not be negative, got {value}"),
            PriceError::NotAnInteger(raw) => write!(f, "price `{raw}` is not an integer"),
        }
    }
}

impl std::error::Error for PriceError {}

/// A single purchase made by a person in a shop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Buying {
    pub id: Uuid,
    pub shop_name: String,
    pub purchase_date: NaiveDate,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub person_id: Uuid,
    pub category_id: Uuid,
}

impl Buying {
    pub fn new(
        person_id: Uuid,
        category_id: Uuid,
        shop_name: impl Into<String>,
        purchase_date: NaiveDate,
        price: Price,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            shop_name: shop_name.into(),
            purchase_date,
            price,
            title: None,
            person_id,
            category_id,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Identifiable for Buying {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl OwnedByPerson for Buying {
    fn person_id(&self) -> Uuid {
        self.person_id
    }
}
