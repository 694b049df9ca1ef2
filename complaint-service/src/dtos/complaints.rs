use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitComplaintRequest {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub rating: i64,
}

#[derive(Debug, Deserialize)]
pub struct ComplaintQuery {
    #[serde(rename = "complaintID")]
    pub complaint_id: Option<String>,
}
