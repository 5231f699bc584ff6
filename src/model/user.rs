use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Session profile fabricated by the stub login. There is no account store
/// behind it; whatever email signs in becomes the manager profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = "admin-1")]
    pub id: String,
    #[schema(example = "Alex Thompson")]
    pub name: String,
    #[schema(example = "admin@taximanager.com", format = "email")]
    pub email: String,
    #[schema(example = "Corporate Manager")]
    pub role: String,
    #[schema(nullable = true)]
    pub avatar: Option<String>,
}
