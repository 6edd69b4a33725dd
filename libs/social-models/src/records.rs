use crate::error::ConversionFailure;
use crate::value::ScalarValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The entity kinds owned by the store, in the fixed lock-ordering used by
/// cross-kind operations: User, Profile, Post, MemberType, Subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    User,
    Profile,
    Post,
    MemberType,
    Subscription,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => f.write_str("User"),
            EntityKind::Profile => f.write_str("Profile"),
            EntityKind::Post => f.write_str("Post"),
            EntityKind::MemberType => f.write_str("MemberType"),
            EntityKind::Subscription => f.write_str("Subscription"),
        }
    }
}

/// Enumerated member type identifier, rendered lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberTypeId {
    Basic,
    Business,
}

impl MemberTypeId {
    pub const ALL: [MemberTypeId; 2] = [MemberTypeId::Basic, MemberTypeId::Business];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberTypeId::Basic => "basic",
            MemberTypeId::Business => "business",
        }
    }
}

impl fmt::Display for MemberTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberTypeId {
    type Err = ConversionFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(MemberTypeId::Basic),
            "business" => Ok(MemberTypeId::Business),
            _ => Err(ConversionFailure::new("string", "MemberTypeId")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i64,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberType {
    pub id: MemberTypeId,
    pub discount: f64,
    pub month_posts_limit: i64,
}

/// A directed subscriber → author edge. Composite-unique per
/// `(subscriber_id, author_id)`; created and removed whole, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub subscriber_id: Uuid,
    pub author_id: Uuid,
}

impl Subscription {
    pub fn key(&self) -> (Uuid, Uuid) {
        (self.subscriber_id, self.author_id)
    }
}

/// A record flowing through nested field resolution. Subscription edges never
/// surface as parent records; their endpoints resolve to `User`s.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    User(User),
    Post(Post),
    Profile(Profile),
    MemberType(MemberType),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::User(_) => EntityKind::User,
            Record::Post(_) => EntityKind::Post,
            Record::Profile(_) => EntityKind::Profile,
            Record::MemberType(_) => EntityKind::MemberType,
        }
    }

    /// The scalar field table: (record kind, response field name) → value.
    /// Relation fields are not in here; those go through the schema graph's
    /// resolver registry.
    pub fn scalar(&self, field: &str) -> Option<ScalarValue> {
        match self {
            Record::User(user) => match field {
                "id" => Some(ScalarValue::Uuid(user.id)),
                "name" => Some(ScalarValue::String(user.name.clone())),
                "balance" => Some(ScalarValue::Float(user.balance)),
                _ => None,
            },
            Record::Post(post) => match field {
                "id" => Some(ScalarValue::Uuid(post.id)),
                "title" => Some(ScalarValue::String(post.title.clone())),
                "content" => Some(ScalarValue::String(post.content.clone())),
                "authorId" => Some(ScalarValue::Uuid(post.author_id)),
                _ => None,
            },
            Record::Profile(profile) => match field {
                "id" => Some(ScalarValue::Uuid(profile.id)),
                "isMale" => Some(ScalarValue::Boolean(profile.is_male)),
                "yearOfBirth" => Some(ScalarValue::Int(profile.year_of_birth)),
                "userId" => Some(ScalarValue::Uuid(profile.user_id)),
                "memberTypeId" => Some(ScalarValue::Enum(profile.member_type_id.to_string())),
                _ => None,
            },
            Record::MemberType(member_type) => match field {
                "id" => Some(ScalarValue::Enum(member_type.id.to_string())),
                "discount" => Some(ScalarValue::Float(member_type.discount)),
                "monthPostsLimit" => Some(ScalarValue::Int(member_type.month_posts_limit)),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn member_type_ids_round_trip_through_their_rendered_form() {
        for id in MemberTypeId::ALL {
            assert_eq!(id.as_str().parse::<MemberTypeId>().unwrap(), id);
        }
        assert!("premium".parse::<MemberTypeId>().is_err());
    }

    #[test]
    fn scalar_table_exposes_response_field_names() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Al".into(),
            balance: 100.0,
        };
        let record = Record::User(user.clone());

        assert_eq!(record.scalar("id"), Some(ScalarValue::Uuid(user.id)));
        assert_eq!(record.scalar("balance"), Some(ScalarValue::Float(100.0)));
        assert_eq!(record.scalar("profile"), None);
    }

    #[test]
    fn profile_scalars_use_camel_case_names() {
        let profile = Profile {
            id: Uuid::new_v4(),
            is_male: true,
            year_of_birth: 1990,
            user_id: Uuid::new_v4(),
            member_type_id: MemberTypeId::Basic,
        };
        let record = Record::Profile(profile);

        assert_eq!(record.scalar("yearOfBirth"), Some(ScalarValue::Int(1990)));
        assert_eq!(
            record.scalar("memberTypeId"),
            Some(ScalarValue::Enum("basic".into()))
        );
        assert_eq!(record.scalar("year_of_birth"), None);
    }
}
