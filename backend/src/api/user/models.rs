//! Request payloads for the user endpoints.
//!
//! Fields missing from the JSON body deserialize as empty, and empty means
//! "not provided" throughout.

use serde::Deserialize;
use validator::Validate;

#[derive(Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUserRequest {
    #[validate(email(message = "must be a valid address of the form name@domain"))]
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateUserRequest {
    #[validate(email(message = "must be a valid address of the form name@domain"))]
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// Collapses empty strings to `None`.
    pub fn normalized(self) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            email: present(self.email),
            name: present(self.name),
            password: present(self.password),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.password.is_none()
    }
}
