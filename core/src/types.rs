//! Wire types for the trip planning API.
//!
//! # Design
//! The backend owns these shapes. `TripPlanResponse` keeps the body exactly
//! as received and only offers typed views over it, so nothing the server
//! sends is rewritten or rejected. The typed plan is lenient: `null` reads as
//! empty, and every number keeps the form the server used.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::serde_util::null_as_default;

/// Trip request payload sent to `POST /api/trip/plan`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TripFormData {
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub travel_days: u32,
    pub transportation: String,
    pub accommodation: String,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text_input: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body returned by `POST /api/trip/plan`, unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TripPlanResponse(Value);

impl TripPlanResponse {
    pub fn success(&self) -> bool {
        self.0.get("success").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn message(&self) -> &str {
        self.0.get("message").and_then(Value::as_str).unwrap_or_default()
    }

    /// The raw `data` object, if present and not `null`.
    pub fn data(&self) -> Option<&Value> {
        self.0.get("data").filter(|data| !data.is_null())
    }

    /// Typed view of `data`. `Ok(None)` when the body carries no plan.
    pub fn plan(&self) -> Result<Option<TripPlan>, serde_json::Error> {
        self.data().map(|data| TripPlan::deserialize(data)).transpose()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for TripPlanResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripPlan {
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub start_date: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub end_date: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub days: Vec<DayPlan>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub weather_info: Vec<WeatherInfo>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub overall_suggestions: String,
    #[serde(default)]
    pub budget: Option<Budget>,
}

/// One day of the itinerary. `day_index` is zero-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub date: String,
    #[serde(default)]
    pub day_index: Option<Number>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub transportation: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub accommodation: String,
    #[serde(default)]
    pub hotel: Option<Hotel>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub attractions: Vec<Attraction>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub longitude: Number,
    pub latitude: Number,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attraction {
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub address: String,
    #[serde(default)]
    pub location: Option<Location>,
    /// Minutes.
    #[serde(default)]
    pub visit_duration: Option<Number>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub ticket_price: Option<Number>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    #[serde(rename = "type", default, deserialize_with = "null_as_default::deserialize")]
    pub meal_type: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<Number>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hotel {
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub address: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub estimated_cost: Option<Number>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherInfo {
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub day_weather: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub night_weather: String,
    #[serde(default)]
    pub day_temp: Option<Value>,
    #[serde(default)]
    pub night_temp: Option<Value>,
}

/// Cost summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    #[serde(default)]
    pub total_attractions: Option<Number>,
    #[serde(default)]
    pub total_hotels: Option<Number>,
    #[serde(default)]
    pub total_meals: Option<Number>,
    #[serde(default)]
    pub total_transportation: Option<Number>,
    #[serde(default)]
    pub total: Option<Number>,
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<Value>,
}
