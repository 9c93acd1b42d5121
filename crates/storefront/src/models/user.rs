//! Signed-in visitor.

use serde::{Deserialize, Serialize};

/// The visitor's identity while signed in.
///
/// Stored in the session under `current_user`. No password is ever kept.
/// The email is whatever the visitor typed; the simulated sign-in does not
/// check its shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    /// A user named after the local part of their sign-in identifier.
    ///
    /// Input without a usable local part is used whole as the name.
    #[must_use]
    pub fn from_login(email: &str) -> Self {
        let email = email.trim();
        let name = email
            .split_once('@')
            .map(|(local, _)| local)
            .filter(|local| !local.is_empty())
            .unwrap_or(email);

        Self {
            name: name.to_owned(),
            email: email.to_owned(),
        }
    }
}
