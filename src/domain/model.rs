use crate::utils::validation::{
    validate_currency_code, validate_non_empty_string, validate_range, FieldResult, Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_YEAR: i32 = 1886;
pub const MAX_YEAR: i32 = 2100;

/// A car as it crosses the `CarService` boundary.
///
/// A bare record (no id) is a creation request; a full record carries the
/// id the backend assigned. Records are replaced, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    manufacturer: String,
    country: String,
    model: String,
    year: i32,
    color: String,
    price: i64,
    currency: String,
}

impl CarRecord {
    pub fn new(
        manufacturer: impl Into<String>,
        country: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        color: impl Into<String>,
        price: i64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            manufacturer: manufacturer.into(),
            country: country.into(),
            model: model.into(),
            year,
            color: color.into(),
            price,
            currency: currency.into(),
        }
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..self
        }
    }

    pub fn without_id(self) -> Self {
        Self { id: None, ..self }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl fmt::Display for CarRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "CarRecord{{id='{}'", id)?,
            None => write!(f, "CarRecord{{id=null")?,
        }
        write!(
            f,
            ", manufacturer='{}', country='{}', model='{}', year={}, color='{}', price={}, currency='{}'}}",
            self.manufacturer, self.country, self.model, self.year, self.color, self.price, self.currency
        )
    }
}

impl Validate for CarRecord {
    fn validate(&self) -> FieldResult<()> {
        validate_non_empty_string("manufacturer", &self.manufacturer)?;
        validate_non_empty_string("country", &self.country)?;
        validate_non_empty_string("model", &self.model)?;
        validate_range("year", self.year, MIN_YEAR, MAX_YEAR)?;
        validate_non_empty_string("color", &self.color)?;
        validate_range("price", self.price, 0, i64::MAX)?;
        validate_currency_code("currency", &self.currency)
    }
}
