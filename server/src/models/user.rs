use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Listing projection. Email and password never leave the store through it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateUserForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateUserForm {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// Values echoed back into a re-rendered form.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub name: String,
    pub email: String,
}

impl From<&CreateUserForm> for FormValues {
    fn from(form: &CreateUserForm) -> Self {
        FormValues {
            name: form.name.clone(),
            email: form.email.clone(),
        }
    }
}

impl From<&UpdateUserForm> for FormValues {
    fn from(form: &UpdateUserForm) -> Self {
        FormValues {
            name: form.name.clone(),
            email: form.email.clone(),
        }
    }
}

impl From<&User> for FormValues {
    fn from(user: &User) -> Self {
        FormValues {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<UserSummary>>,
}

impl DeleteResponse {
    pub fn deleted(users: Vec<UserSummary>) -> Self {
        DeleteResponse {
            success: true,
            message: "User deleted successfully",
            data: Some(users),
        }
    }

    pub fn failed(message: &'static str) -> Self {
        DeleteResponse {
            success: false,
            message,
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_drops_private_fields() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Bob".to_owned(),
            email: "b@x.com".to_owned(),
            password: "pw".to_owned(),
        };
        let json = serde_json::to_value(user.summary()).unwrap();
        assert_eq!(json["name"], "Bob");
        assert_eq!(json["id"], user.id.to_string());
        assert!(json.get("email").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn failed_delete_response_has_no_data() {
        let json = serde_json::to_value(DeleteResponse::failed("User not found")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "User not found"}));
    }
}
