//! The relation-resolver registry: one plain function per (entity kind,
//! relation field), installed on the schema graph at build time. Each
//! resolver takes the parent record and produces the related record(s)
//! through the entity store — one store lookup per parent instance, the
//! accepted N+1 shape.

use memory_connector::{ConnectorError, DataStore};
use social_models::prelude::*;

pub type RelationResolver = fn(&DataStore, &Record) -> memory_connector::Result<ResolvedRelation>;

#[derive(Debug, Clone)]
pub enum ResolvedRelation {
    One(Option<Record>),
    Many(Vec<Record>),
}

fn as_user<'a>(record: &'a Record) -> memory_connector::Result<&'a User> {
    match record {
        Record::User(user) => Ok(user),
        other => Err(ConnectorError::inconsistent(format!(
            "expected a User parent record, got {}",
            other.kind()
        ))),
    }
}

fn as_post<'a>(record: &'a Record) -> memory_connector::Result<&'a Post> {
    match record {
        Record::Post(post) => Ok(post),
        other => Err(ConnectorError::inconsistent(format!(
            "expected a Post parent record, got {}",
            other.kind()
        ))),
    }
}

fn as_profile<'a>(record: &'a Record) -> memory_connector::Result<&'a Profile> {
    match record {
        Record::Profile(profile) => Ok(profile),
        other => Err(ConnectorError::inconsistent(format!(
            "expected a Profile parent record, got {}",
            other.kind()
        ))),
    }
}

fn as_member_type<'a>(record: &'a Record) -> memory_connector::Result<&'a MemberType> {
    match record {
        Record::MemberType(member_type) => Ok(member_type),
        other => Err(ConnectorError::inconsistent(format!(
            "expected a MemberType parent record, got {}",
            other.kind()
        ))),
    }
}

pub(crate) fn user_profile(
    store: &DataStore,
    parent: &Record,
) -> memory_connector::Result<ResolvedRelation> {
    let user = as_user(parent)?;
    Ok(ResolvedRelation::One(
        store.profile_by_user(user.id).map(Record::Profile),
    ))
}

pub(crate) fn user_posts(
    store: &DataStore,
    parent: &Record,
) -> memory_connector::Result<ResolvedRelation> {
    let user = as_user(parent)?;
    Ok(ResolvedRelation::Many(
        store
            .posts_by_author(user.id)
            .into_iter()
            .map(Record::Post)
            .collect(),
    ))
}

/// Authors this user subscribes to. A dangling edge endpoint here means a
/// cascade failed to remove it: that is a store inconsistency, not user error.
pub(crate) fn user_subscribed_to(
    store: &DataStore,
    parent: &Record,
) -> memory_connector::Result<ResolvedRelation> {
    let user = as_user(parent)?;
    let authors = store
        .subscriptions_by_subscriber(user.id)
        .into_iter()
        .map(|edge| {
            store
                .find_user(edge.author_id)
                .map(Record::User)
                .ok_or_else(|| {
                    ConnectorError::inconsistent(format!(
                        "subscription edge points at missing author `{}`",
                        edge.author_id
                    ))
                })
        })
        .collect::<memory_connector::Result<Vec<_>>>()?;

    Ok(ResolvedRelation::Many(authors))
}

/// Subscribers of this user.
pub(crate) fn subscribed_to_user(
    store: &DataStore,
    parent: &Record,
) -> memory_connector::Result<ResolvedRelation> {
    let user = as_user(parent)?;
    let subscribers = store
        .subscriptions_by_author(user.id)
        .into_iter()
        .map(|edge| {
            store
                .find_user(edge.subscriber_id)
                .map(Record::User)
                .ok_or_else(|| {
                    ConnectorError::inconsistent(format!(
                        "subscription edge points at missing subscriber `{}`",
                        edge.subscriber_id
                    ))
                })
        })
        .collect::<memory_connector::Result<Vec<_>>>()?;

    Ok(ResolvedRelation::Many(subscribers))
}

pub(crate) fn post_author(
    store: &DataStore,
    parent: &Record,
) -> memory_connector::Result<ResolvedRelation> {
    let post = as_post(parent)?;
    let author = store.find_user(post.author_id).map(Record::User).ok_or_else(|| {
        ConnectorError::inconsistent(format!(
            "post `{}` references missing author `{}`",
            post.id, post.author_id
        ))
    })?;

    Ok(ResolvedRelation::One(Some(author)))
}

pub(crate) fn profile_user(
    store: &DataStore,
    parent: &Record,
) -> memory_connector::Result<ResolvedRelation> {
    let profile = as_profile(parent)?;
    let user = store.find_user(profile.user_id).map(Record::User).ok_or_else(|| {
        ConnectorError::inconsistent(format!(
            "profile `{}` references missing user `{}`",
            profile.id, profile.user_id
        ))
    })?;

    Ok(ResolvedRelation::One(Some(user)))
}

/// Member types are leaf-deletable, so a dangling `memberTypeId` is a legal
/// state: it surfaces as a plain not-found field error, not an inconsistency.
pub(crate) fn profile_member_type(
    store: &DataStore,
    parent: &Record,
) -> memory_connector::Result<ResolvedRelation> {
    let profile = as_profile(parent)?;
    let member_type = store.member_type(profile.member_type_id)?;

    Ok(ResolvedRelation::One(Some(Record::MemberType(member_type))))
}

pub(crate) fn member_type_profiles(
    store: &DataStore,
    parent: &Record,
) -> memory_connector::Result<ResolvedRelation> {
    let member_type = as_member_type(parent)?;
    Ok(ResolvedRelation::Many(
        store
            .profiles_by_member_type(member_type.id)
            .into_iter()
            .map(Record::Profile)
            .collect(),
    ))
}
