//! User model - registered complainants and the complaints they own.

use serde::{Deserialize, Serialize};

use super::Complaint;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub secret_code: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub complaints: Vec<Complaint>,
}

impl User {
    /// Create a user with no complaints.
    pub fn new(id: String, secret_code: String, name: String, email: String) -> Self {
        Self {
            id,
            secret_code,
            name,
            email,
            complaints: Vec::new(),
        }
    }

    pub fn complaint(&self, complaint_id: &str) -> Option<&Complaint> {
        self.complaints.iter().find(|c| c.id == complaint_id)
    }

    pub fn complaint_mut(&mut self, complaint_id: &str) -> Option<&mut Complaint> {
        self.complaints.iter_mut().find(|c| c.id == complaint_id)
    }

    /// Check whether this user registered with `email`, ignoring case and
    /// surrounding whitespace.
    pub fn has_email(&self, email: &str) -> bool {
        normalize_email(&self.email) == normalize_email(email)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> User {
        User::new(
            "348".to_string(),
            "123456".to_string(),
            "Ana".to_string(),
            "a@x.com".to_string(),
        )
    }

    #[test]
    fn serializes_with_camel_case_and_omits_empty_complaints() {
        let json = serde_json::to_value(ana()).unwrap();
        assert_eq!(json["secretCode"], "123456");
        assert!(json.get("complaints").is_none());
    }

    #[test]
    fn email_match_ignores_case_and_whitespace() {
        assert!(ana().has_email("  A@X.com "));
        assert!(!ana().has_email("b@x.com"));
    }

    #[test]
    fn complaint_lookup_by_id() {
        let mut user = ana();
        user.complaints.push(Complaint::new(
            "7".to_string(),
            "T".to_string(),
            "S".to_string(),
            4,
        ));

        assert!(user.complaint("7").is_some());
        assert!(user.complaint("8").is_none());

        user.complaint_mut("7").unwrap().resolve();
        assert!(user.complaints[0].resolved);
    }
}
