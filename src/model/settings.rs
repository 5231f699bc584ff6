use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "currency": "USD",
        "auto_ai": true,
        "dark_mode": false,
        "company_name": "Acme Corp",
        "monthly_budget": 5000.0
    })
)]
pub struct AppSettings {
    #[schema(example = "USD")]
    pub currency: String,

    /// Generate AI insights automatically when the dashboard loads.
    #[schema(example = true)]
    pub auto_ai: bool,

    #[schema(example = false)]
    pub dark_mode: bool,

    #[schema(example = "Acme Corp")]
    pub company_name: String,

    #[schema(example = 5000.0)]
    pub monthly_budget: f64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            auto_ai: true,
            dark_mode: false,
            company_name: "Acme Corp".to_string(),
            monthly_budget: 5000.0,
        }
    }
}
