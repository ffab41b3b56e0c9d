use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const SERVICE_NAME: &str = "Trip Planner Mock";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripRequest {
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub travel_days: i64,
    pub transportation: String,
    pub accommodation: String,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub free_text_input: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attraction {
    pub name: String,
    pub address: String,
    pub location: Location,
    pub visit_duration: u32,
    pub description: String,
    pub category: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meal {
    #[serde(rename = "type")]
    pub meal_type: String,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: String,
    pub day_index: u32,
    pub description: String,
    pub transportation: String,
    pub accommodation: String,
    pub attractions: Vec<Attraction>,
    pub meals: Vec<Meal>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripPlan {
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<DayPlan>,
    pub weather_info: Vec<Value>,
    pub overall_suggestions: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripPlanResponse {
    pub success: bool,
    pub message: String,
    pub data: TripPlan,
}

/// Error body in the backend's `{"detail": ...}` shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub name: String,
    pub version: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            name: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
        }
    }
}

pub fn app() -> Router {
    app_with_state(AppState::default())
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/trip/health", get(trip_health))
        .route("/api/trip/plan", post(plan_trip))
        .with_state(Arc::new(state))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "name": state.name,
        "version": state.version,
        "status": "running",
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.name,
        "version": state.version,
    }))
}

async fn trip_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "trip-planner",
    }))
}

async fn plan_trip(
    Json(request): Json<TripRequest>,
) -> Result<Json<TripPlanResponse>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!(
        city = %request.city,
        start_date = %request.start_date,
        travel_days = request.travel_days,
        "trip planning request"
    );
    match build_plan(&request) {
        Ok(plan) => Ok(Json(TripPlanResponse {
            success: true,
            message: "Trip plan generated successfully".to_string(),
            data: plan,
        })),
        Err(reason) => {
            tracing::warn!(city = %request.city, %reason, "trip plan generation failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: format!("Failed to generate trip plan: {reason}"),
                }),
            ))
        }
    }
}

/// Longest trip the planner accepts.
pub const MAX_TRAVEL_DAYS: u32 = 30;

/// `count` consecutive dates from `start`, or `None` past the calendar's end.
fn trip_dates(start: NaiveDate, count: u32) -> Option<Vec<NaiveDate>> {
    (0..count)
        .map(|i| start.checked_add_days(Days::new(u64::from(i))))
        .collect()
}

/// Deterministic itinerary: one day per travel day from `start_date`, two
/// attractions and three meals per day.
pub fn build_plan(request: &TripRequest) -> Result<TripPlan, String> {
    if request.travel_days < 1 {
        return Err(format!("travel_days must be at least 1, got {}", request.travel_days));
    }
    let count = u32::try_from(request.travel_days)
        .ok()
        .filter(|&days| days <= MAX_TRAVEL_DAYS)
        .ok_or_else(|| format!("travel_days must be at most {MAX_TRAVEL_DAYS}, got {}", request.travel_days))?;
    let start = NaiveDate::parse_from_str(&request.start_date, "%Y-%m-%d")
        .map_err(|e| format!("invalid start_date '{}': {e}", request.start_date))?;
    let dates = trip_dates(start, count)
        .ok_or_else(|| format!("start_date '{}' leaves no room for {count} days", request.start_date))?;

    let days = (0..count)
        .zip(dates)
        .map(|(i, date)| {
            let n = i + 1;
            DayPlan {
                date: date.format("%Y-%m-%d").to_string(),
                day_index: i,
                description: format!("Day {n} itinerary"),
                transportation: request.transportation.clone(),
                accommodation: request.accommodation.clone(),
                attractions: (0..2u32)
                    .map(|j| Attraction {
                        name: format!("{} Attraction {}", request.city, j + 1),
                        address: request.city.clone(),
                        location: Location {
                            longitude: 116.4 + f64::from(i) * 0.01 + f64::from(j) * 0.005,
                            latitude: 39.9 + f64::from(i) * 0.01 + f64::from(j) * 0.005,
                        },
                        visit_duration: 120,
                        description: format!("Famous attraction in {}", request.city),
                        category: "Attraction".to_string(),
                    })
                    .collect(),
                meals: vec![
                    meal("breakfast", format!("Day {n} Breakfast"), "Local specialty breakfast"),
                    meal("lunch", format!("Day {n} Lunch"), "Lunch recommendation"),
                    meal("dinner", format!("Day {n} Dinner"), "Dinner recommendation"),
                ],
            }
        })
        .collect();

    Ok(TripPlan {
        city: request.city.clone(),
        start_date: request.start_date.clone(),
        end_date: request.end_date.clone(),
        days,
        weather_info: Vec::new(),
        overall_suggestions: format!(
            "This is a {}-day itinerary for {}. Please check the opening hours of attractions in advance.",
            request.travel_days, request.city
        ),
    })
}

fn meal(meal_type: &str, name: String, description: &str) -> Meal {
    Meal {
        meal_type: meal_type.to_string(),
        name,
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(days: i64, start: &str) -> TripRequest {
        TripRequest {
            city: "Chengdu".to_string(),
            start_date: start.to_string(),
            end_date: "2025-03-03".to_string(),
            travel_days: days,
            transportation: "metro".to_string(),
            accommodation: "hostel".to_string(),
            preferences: Vec::new(),
            free_text_input: None,
        }
    }

    #[test]
    fn plan_has_one_day_per_travel_day() {
        let plan = build_plan(&request(3, "2025-03-01")).unwrap();
        assert_eq!(plan.days.len(), 3);
        assert_eq!(plan.days[0].date, "2025-03-01");
        assert_eq!(plan.days[2].date, "2025-03-03");
        assert_eq!(plan.days[2].day_index, 2);
    }

    #[test]
    fn dates_roll_over_month_end() {
        let plan = build_plan(&request(2, "2024-02-29")).unwrap();
        assert_eq!(plan.days[1].date, "2024-03-01");
    }

    #[test]
    fn each_day_has_attractions_and_meals() {
        let plan = build_plan(&request(1, "2025-03-01")).unwrap();
        let day = &plan.days[0];
        assert_eq!(day.attractions.len(), 2);
        assert_eq!(day.attractions[1].name, "Chengdu Attraction 2");
        let kinds: Vec<&str> = day.meals.iter().map(|m| m.meal_type.as_str()).collect();
        assert_eq!(kinds, ["breakfast", "lunch", "dinner"]);
        assert_eq!(day.transportation, "metro");
    }

    #[test]
    fn zero_days_is_rejected() {
        let err = build_plan(&request(0, "2025-03-01")).unwrap_err();
        assert!(err.contains("travel_days"));
    }

    #[test]
    fn oversized_days_are_rejected() {
        for days in [31, (1 << 32) + 1, i64::MAX] {
            let err = build_plan(&request(days, "2025-03-01")).unwrap_err();
            assert_eq!(err, format!("travel_days must be at most 30, got {days}"));
        }
        assert_eq!(build_plan(&request(30, "2025-03-01")).unwrap().days.len(), 30);
    }

    #[test]
    fn negative_days_are_rejected() {
        let err = build_plan(&request(-3, "2025-03-01")).unwrap_err();
        assert_eq!(err, "travel_days must be at least 1, got -3");
    }

    #[test]
    fn dates_stop_at_calendar_end() {
        assert!(trip_dates(NaiveDate::MAX, 2).is_none());
        assert_eq!(trip_dates(NaiveDate::MAX, 1), Some(vec![NaiveDate::MAX]));
    }

    #[test]
    fn bad_start_date_is_rejected() {
        let err = build_plan(&request(2, "March 1st")).unwrap_err();
        assert!(err.starts_with("invalid start_date 'March 1st'"));
    }

    #[test]
    fn meal_serializes_type_field() {
        let json = serde_json::to_value(meal("lunch", "Noodles".to_string(), "Hot")).unwrap();
        assert_eq!(json["type"], "lunch");
        assert!(json.get("meal_type").is_none());
    }
}
