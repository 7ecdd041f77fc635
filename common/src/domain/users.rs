use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::record::{self, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Editor,
    Admin,
}

impl Role {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "user" => Some(Self::User),
            "editor" => Some(Self::Editor),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Editor => "editor",
            Self::Admin => "admin",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
    Blocked,
    Trial,
    Expired,
}

impl SubscriptionStatus {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "blocked" => Some(Self::Blocked),
            "trial" => Some(Self::Trial),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Blocked => "blocked",
            Self::Trial => "trial",
            Self::Expired => "expired",
        }
    }
}

/// A directory entry for a known visitor.
///
/// Created on first authentication (role=user, access=false) or manually by
/// an admin; mutated only through explicit admin updates; never deleted
/// automatically. `access` is the entitlement flag gating protected content,
/// independent of `role`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub subscription_status: SubscriptionStatus,
    pub access: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl UserRecord {
    /// The record written the first time an identity shows up with no
    /// directory entry: non-entitled regular user.
    pub fn first_sign_in(id: &str, email: &str) -> Self {
        Self {
            id: id.to_owned(),
            email: email.to_owned(),
            role: Role::User,
            subscription_status: SubscriptionStatus::Inactive,
            access: false,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Record for UserRecord {
    fn from_document(id: &str, body: &Value) -> Self {
        Self {
            id: id.to_owned(),
            email: record::text(body, "email"),
            role: Role::from_tag(&record::text(body, "role")).unwrap_or(Role::User),
            subscription_status: SubscriptionStatus::from_tag(&record::text(
                body,
                "subscriptionStatus",
            ))
            .unwrap_or(SubscriptionStatus::Inactive),
            access: record::flag(body, "access"),
            created_at: record::optional_text(body, "createdAt"),
            updated_at: record::optional_text(body, "updatedAt"),
        }
    }

    fn to_document(&self) -> Value {
        json!({
            "email": self.email,
            "role": self.role.tag(),
            "subscriptionStatus": self.subscription_status.tag(),
            "access": self.access,
            "createdAt": self.created_at,
            "updatedAt": self.updated_at,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    // Users are addressed by id, never by slug.
    fn slug(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn first_sign_in_record_is_non_entitled_regular_user() {
        let user = UserRecord::first_sign_in("u1", "g@example.com");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.subscription_status, SubscriptionStatus::Inactive);
        assert!(!user.access);
    }

    #[test]
    fn unknown_tags_fall_back_to_defaults() {
        let body = json!({ "role": "owner", "subscriptionStatus": "comped" });
        let user = UserRecord::from_document("u1", &body);
        assert_eq!(user.role, Role::User);
        assert_eq!(user.subscription_status, SubscriptionStatus::Inactive);
    }

    #[test]
    fn admin_round_trips_through_document_body() {
        let body = json!({
            "email": "e@example.com",
            "role": "admin",
            "subscriptionStatus": "active",
            "access": true,
        });
        let user = UserRecord::from_document("u2", &body);
        assert_eq!(user.role, Role::Admin);
        assert!(user.access);
        assert_eq!(user.to_document()["role"], "admin");
    }
}
