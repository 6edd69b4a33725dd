use super::{read, ResolutionContext};
use crate::error::CoreError;
use crate::query_document::FieldPair;
use crate::response_ir::Item;
use memory_connector::IntegrityEnforcer;
use schema::QueryTag;
use social_models::prelude::*;

/// Dispatches one mutation root field to its enforcer-wrapped store
/// operation, then feeds the affected record back through nested read
/// resolution.
pub(crate) fn resolve_root(
    ctx: &mut ResolutionContext<'_>,
    pair: &FieldPair,
    path: &[String],
) -> crate::Result<Item> {
    ctx.check_deadline()?;

    let info = pair
        .schema_field
        .query_info
        .ok_or_else(|| CoreError::internal("root field carries no query info"))?;

    let enforcer = IntegrityEnforcer::new(ctx.store);
    let field = &pair.parsed_field;

    let record = match (info.tag, info.model) {
        (QueryTag::CreateOne, EntityKind::User) => Record::User(enforcer.create_user(UserCreateInput {
            name: field.required_string("name")?,
            balance: field.required_float("balance")?,
        })),
        (QueryTag::UpdateOne, EntityKind::User) => Record::User(enforcer.update_user(
            field.required_uuid("id")?,
            UserUpdateInput {
                name: field.optional_string("name")?,
                balance: field.optional_float("balance")?,
            },
        )?),
        (QueryTag::DeleteOne, EntityKind::User) => {
            Record::User(enforcer.delete_user(field.required_uuid("id")?)?)
        }

        (QueryTag::CreateOne, EntityKind::Post) => Record::Post(enforcer.create_post(PostCreateInput {
            title: field.required_string("title")?,
            content: field.required_string("content")?,
            author_id: field.required_uuid("authorId")?,
        })?),
        (QueryTag::UpdateOne, EntityKind::Post) => Record::Post(enforcer.update_post(
            field.required_uuid("id")?,
            PostUpdateInput {
                title: field.optional_string("title")?,
                content: field.optional_string("content")?,
            },
        )?),
        (QueryTag::DeleteOne, EntityKind::Post) => {
            Record::Post(enforcer.delete_post(field.required_uuid("id")?)?)
        }

        (QueryTag::CreateOne, EntityKind::Profile) => {
            Record::Profile(enforcer.create_profile(ProfileCreateInput {
                is_male: field.required_bool("isMale")?,
                year_of_birth: field.required_int("yearOfBirth")?,
                user_id: field.required_uuid("userId")?,
                member_type_id: field.required_member_type_id("memberTypeId")?,
            })?)
        }
        (QueryTag::UpdateOne, EntityKind::Profile) => Record::Profile(enforcer.update_profile(
            field.required_uuid("id")?,
            ProfileUpdateInput {
                is_male: field.optional_bool("isMale")?,
                year_of_birth: field.optional_int("yearOfBirth")?,
                member_type_id: field.optional_member_type_id("memberTypeId")?,
            },
        )?),
        (QueryTag::DeleteOne, EntityKind::Profile) => {
            Record::Profile(enforcer.delete_profile(field.required_uuid("id")?)?)
        }

        (QueryTag::CreateOne, EntityKind::MemberType) => {
            Record::MemberType(enforcer.create_member_type(MemberTypeCreateInput {
                id: field.required_member_type_id("id")?,
                discount: field.required_float("discount")?,
                month_posts_limit: field.required_int("monthPostsLimit")?,
            })?)
        }
        (QueryTag::UpdateOne, EntityKind::MemberType) => {
            Record::MemberType(enforcer.update_member_type(
                field.required_member_type_id("id")?,
                MemberTypeUpdateInput {
                    discount: field.optional_float("discount")?,
                    month_posts_limit: field.optional_int("monthPostsLimit")?,
                },
            )?)
        }
        (QueryTag::DeleteOne, EntityKind::MemberType) => {
            Record::MemberType(enforcer.delete_member_type(field.required_member_type_id("id")?)?)
        }

        // Subscription mutations answer with the subscriber, so nested
        // selections can immediately inspect the updated edge lists.
        (QueryTag::Subscribe, EntityKind::Subscription) => {
            let subscriber_id = field.required_uuid("subscriberId")?;
            let author_id = field.required_uuid("authorId")?;
            enforcer.create_subscription(subscriber_id, author_id)?;
            Record::User(ctx.store.user(subscriber_id)?)
        }
        (QueryTag::Unsubscribe, EntityKind::Subscription) => {
            let subscriber_id = field.required_uuid("subscriberId")?;
            let author_id = field.required_uuid("authorId")?;
            enforcer.delete_subscription(subscriber_id, author_id)?;
            Record::User(ctx.store.user(subscriber_id)?)
        }

        (tag, model) => {
            return Err(CoreError::internal(format!(
                "no write dispatch for {tag:?} on {model}"
            )))
        }
    };

    tracing::debug!(tag = ?info.tag, model = %info.model, "mutation committed");

    let nested = read::nested_object(pair)?;
    Ok(Item::Map(read::resolve_record(ctx, &record, nested, path)))
}
