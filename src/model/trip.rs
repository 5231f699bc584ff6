use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Trip lifecycle state. Wire strings are exact PascalCase and matched
/// case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
pub enum TripStatus {
    Pending,
    Approved,
    Rejected,
}

/// Fixed business categories a trip can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
pub enum TripCategory {
    #[serde(rename = "Client Meeting")]
    #[strum(serialize = "Client Meeting")]
    ClientMeeting,
    #[serde(rename = "Office Commute")]
    #[strum(serialize = "Office Commute")]
    OfficeCommute,
    Event,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "101",
        "employee_id": "1",
        "date": "2023-10-24",
        "time": "09:00",
        "pickup": "Downtown Office",
        "dropoff": "Client HQ - Tech Park",
        "amount": 32.50,
        "currency": "USD",
        "status": "Approved",
        "purpose": "Q4 Strategy Meeting",
        "category": "Client Meeting"
    })
)]
pub struct Trip {
    #[schema(example = "101")]
    pub id: String,

    /// May reference a deleted employee; aggregation buckets such trips
    /// under "Other" instead of failing.
    #[schema(example = "1")]
    pub employee_id: String,

    #[schema(example = "2023-10-24", format = "date")]
    pub date: String,

    #[schema(example = "09:00")]
    pub time: String,

    #[schema(example = "Downtown Office")]
    pub pickup: String,

    #[schema(example = "Client HQ - Tech Park")]
    pub dropoff: String,

    #[schema(example = 32.50)]
    pub amount: f64,

    #[schema(example = "USD")]
    pub currency: String,

    #[schema(example = "Pending")]
    pub status: TripStatus,

    #[schema(example = "Q4 Strategy Meeting")]
    pub purpose: String,

    #[schema(example = "Client Meeting")]
    pub category: TripCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_exact_pascal_case() {
        assert_eq!(
            serde_json::to_string(&TripStatus::Pending).unwrap(),
            "\"Pending\""
        );
        assert_eq!(
            serde_json::from_str::<TripStatus>("\"Rejected\"").unwrap(),
            TripStatus::Rejected
        );
        assert!(serde_json::from_str::<TripStatus>("\"pending\"").is_err());
    }

    #[test]
    fn category_uses_display_strings_with_spaces() {
        assert_eq!(
            serde_json::to_string(&TripCategory::ClientMeeting).unwrap(),
            "\"Client Meeting\""
        );
        assert_eq!(
            "Office Commute".parse::<TripCategory>().unwrap(),
            TripCategory::OfficeCommute
        );
        assert!("Commute".parse::<TripCategory>().is_err());
    }
}
