use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "1",
        "name": "Sarah Chen",
        "department": "Sales",
        "email": "sarah.c@company.com",
        "avatar": "https://picsum.photos/seed/sarah/100/100"
    })
)]
pub struct Employee {
    #[schema(example = "1")]
    pub id: String,

    #[schema(example = "Sarah Chen")]
    pub name: String,

    #[schema(example = "Sales")]
    pub department: String,

    #[schema(example = "sarah.c@company.com", format = "email")]
    pub email: String,

    #[schema(example = "https://picsum.photos/seed/sarah/100/100", nullable = true)]
    pub avatar: Option<String>,
}
