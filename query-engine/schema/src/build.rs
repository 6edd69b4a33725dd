//! Assembles the social-platform query schema. The arena order below is
//! load-bearing only within this module: every cross-reference goes through
//! the local `ObjectId` bindings.

use crate::enum_type::EnumType;
use crate::input_types::{InputField, InputType};
use crate::output_types::{ObjectId, ObjectType, OutputField, OutputType};
use crate::query_schema::{QueryInfo, QuerySchema, QueryTag};
use crate::resolvers;
use social_models::{EntityKind, MemberTypeId};

const USER: ObjectId = ObjectId(0);
const POST: ObjectId = ObjectId(1);
const PROFILE: ObjectId = ObjectId(2);
const MEMBER_TYPE: ObjectId = ObjectId(3);
const QUERY: ObjectId = ObjectId(4);
const MUTATION: ObjectId = ObjectId(5);

pub fn build(max_depth: usize) -> QuerySchema {
    let objects = vec![
        user_object(),
        post_object(),
        profile_object(),
        member_type_object(),
        query_object(),
        mutation_object(),
    ];

    QuerySchema::new(objects, QUERY, MUTATION, max_depth)
}

fn member_type_id_enum() -> EnumType {
    EnumType::new(
        "MemberTypeId",
        MemberTypeId::ALL.iter().map(|id| id.as_str()).collect(),
    )
}

fn field(name: &str, field_type: OutputType) -> OutputField {
    OutputField::new(name, field_type)
}

fn id_argument() -> InputField {
    InputField::new("id", InputType::uuid(), true)
}

fn user_object() -> ObjectType {
    ObjectType::new(
        "User",
        vec![
            field("id", OutputType::non_list(OutputType::uuid())),
            field("name", OutputType::non_list(OutputType::string())),
            field("balance", OutputType::non_list(OutputType::float())),
            field("profile", OutputType::non_list(OutputType::object(PROFILE)))
                .nullable()
                .with_resolver(resolvers::user_profile),
            field("posts", OutputType::list(OutputType::object(POST)))
                .with_resolver(resolvers::user_posts),
            field(
                "userSubscribedTo",
                OutputType::list(OutputType::object(USER)),
            )
            .with_resolver(resolvers::user_subscribed_to),
            field(
                "subscribedToUser",
                OutputType::list(OutputType::object(USER)),
            )
            .with_resolver(resolvers::subscribed_to_user),
        ],
    )
}

fn post_object() -> ObjectType {
    ObjectType::new(
        "Post",
        vec![
            field("id", OutputType::non_list(OutputType::uuid())),
            field("title", OutputType::non_list(OutputType::string())),
            field("content", OutputType::non_list(OutputType::string())),
            field("authorId", OutputType::non_list(OutputType::uuid())),
            field("author", OutputType::non_list(OutputType::object(USER)))
                .with_resolver(resolvers::post_author),
        ],
    )
}

fn profile_object() -> ObjectType {
    ObjectType::new(
        "Profile",
        vec![
            field("id", OutputType::non_list(OutputType::uuid())),
            field("isMale", OutputType::non_list(OutputType::boolean())),
            field("yearOfBirth", OutputType::non_list(OutputType::int())),
            field("userId", OutputType::non_list(OutputType::uuid())),
            field(
                "memberTypeId",
                OutputType::non_list(OutputType::enum_type(member_type_id_enum())),
            ),
            field("user", OutputType::non_list(OutputType::object(USER)))
                .with_resolver(resolvers::profile_user),
            field(
                "memberType",
                OutputType::non_list(OutputType::object(MEMBER_TYPE)),
            )
            .with_resolver(resolvers::profile_member_type),
        ],
    )
}

fn member_type_object() -> ObjectType {
    ObjectType::new(
        "MemberType",
        vec![
            field(
                "id",
                OutputType::non_list(OutputType::enum_type(member_type_id_enum())),
            ),
            field("discount", OutputType::non_list(OutputType::float())),
            field("monthPostsLimit", OutputType::non_list(OutputType::int())),
            field("profiles", OutputType::list(OutputType::object(PROFILE)))
                .with_resolver(resolvers::member_type_profiles),
        ],
    )
}

fn query_object() -> ObjectType {
    ObjectType::new(
        "Query",
        vec![
            field("users", OutputType::list(OutputType::object(USER))).with_query_info(QueryInfo {
                model: EntityKind::User,
                tag: QueryTag::FindMany,
            }),
            field("user", OutputType::non_list(OutputType::object(USER)))
                .nullable()
                .with_arguments(vec![id_argument()])
                .with_query_info(QueryInfo {
                    model: EntityKind::User,
                    tag: QueryTag::FindUnique,
                }),
            field("posts", OutputType::list(OutputType::object(POST))).with_query_info(QueryInfo {
                model: EntityKind::Post,
                tag: QueryTag::FindMany,
            }),
            field("post", OutputType::non_list(OutputType::object(POST)))
                .nullable()
                .with_arguments(vec![id_argument()])
                .with_query_info(QueryInfo {
                    model: EntityKind::Post,
                    tag: QueryTag::FindUnique,
                }),
            field("profiles", OutputType::list(OutputType::object(PROFILE))).with_query_info(
                QueryInfo {
                    model: EntityKind::Profile,
                    tag: QueryTag::FindMany,
                },
            ),
            field("profile", OutputType::non_list(OutputType::object(PROFILE)))
                .nullable()
                .with_arguments(vec![id_argument()])
                .with_query_info(QueryInfo {
                    model: EntityKind::Profile,
                    tag: QueryTag::FindUnique,
                }),
            field(
                "memberTypes",
                OutputType::list(OutputType::object(MEMBER_TYPE)),
            )
            .with_query_info(QueryInfo {
                model: EntityKind::MemberType,
                tag: QueryTag::FindMany,
            }),
            field(
                "memberType",
                OutputType::non_list(OutputType::object(MEMBER_TYPE)),
            )
            .nullable()
            .with_arguments(vec![InputField::new(
                "id",
                InputType::enum_type(member_type_id_enum()),
                true,
            )])
            .with_query_info(QueryInfo {
                model: EntityKind::MemberType,
                tag: QueryTag::FindUnique,
            }),
        ],
    )
}

fn mutation_object() -> ObjectType {
    let member_type_id = || InputType::enum_type(member_type_id_enum());

    ObjectType::new(
        "Mutation",
        vec![
            field("createUser", OutputType::non_list(OutputType::object(USER)))
                .nullable()
                .with_arguments(vec![
                    InputField::new("name", InputType::string(), true),
                    InputField::new("balance", InputType::float(), true),
                ])
                .with_query_info(QueryInfo {
                    model: EntityKind::User,
                    tag: QueryTag::CreateOne,
                }),
            field("updateUser", OutputType::non_list(OutputType::object(USER)))
                .nullable()
                .with_arguments(vec![
                    id_argument(),
                    InputField::new("name", InputType::string(), false),
                    InputField::new("balance", InputType::float(), false),
                ])
                .with_query_info(QueryInfo {
                    model: EntityKind::User,
                    tag: QueryTag::UpdateOne,
                }),
            field("deleteUser", OutputType::non_list(OutputType::object(USER)))
                .nullable()
                .with_arguments(vec![id_argument()])
                .with_query_info(QueryInfo {
                    model: EntityKind::User,
                    tag: QueryTag::DeleteOne,
                }),
            field("createPost", OutputType::non_list(OutputType::object(POST)))
                .nullable()
                .with_arguments(vec![
                    InputField::new("title", InputType::string(), true),
                    InputField::new("content", InputType::string(), true),
                    InputField::new("authorId", InputType::uuid(), true),
                ])
                .with_query_info(QueryInfo {
                    model: EntityKind::Post,
                    tag: QueryTag::CreateOne,
                }),
            field("updatePost", OutputType::non_list(OutputType::object(POST)))
                .nullable()
                .with_arguments(vec![
                    id_argument(),
                    InputField::new("title", InputType::string(), false),
                    InputField::new("content", InputType::string(), false),
                ])
                .with_query_info(QueryInfo {
                    model: EntityKind::Post,
                    tag: QueryTag::UpdateOne,
                }),
            field("deletePost", OutputType::non_list(OutputType::object(POST)))
                .nullable()
                .with_arguments(vec![id_argument()])
                .with_query_info(QueryInfo {
                    model: EntityKind::Post,
                    tag: QueryTag::DeleteOne,
                }),
            field(
                "createProfile",
                OutputType::non_list(OutputType::object(PROFILE)),
            )
            .nullable()
            .with_arguments(vec![
                InputField::new("isMale", InputType::boolean(), true),
                InputField::new("yearOfBirth", InputType::int(), true),
                InputField::new("userId", InputType::uuid(), true),
                InputField::new("memberTypeId", member_type_id(), true),
            ])
            .with_query_info(QueryInfo {
                model: EntityKind::Profile,
                tag: QueryTag::CreateOne,
            }),
            field(
                "updateProfile",
                OutputType::non_list(OutputType::object(PROFILE)),
            )
            .nullable()
            .with_arguments(vec![
                id_argument(),
                InputField::new("isMale", InputType::boolean(), false),
                InputField::new("yearOfBirth", InputType::int(), false),
                InputField::new("memberTypeId", member_type_id(), false),
            ])
            .with_query_info(QueryInfo {
                model: EntityKind::Profile,
                tag: QueryTag::UpdateOne,
            }),
            field(
                "deleteProfile",
                OutputType::non_list(OutputType::object(PROFILE)),
            )
            .nullable()
            .with_arguments(vec![id_argument()])
            .with_query_info(QueryInfo {
                model: EntityKind::Profile,
                tag: QueryTag::DeleteOne,
            }),
            field(
                "createMemberType",
                OutputType::non_list(OutputType::object(MEMBER_TYPE)),
            )
            .nullable()
            .with_arguments(vec![
                InputField::new("id", member_type_id(), true),
                InputField::new("discount", InputType::float(), true),
                InputField::new("monthPostsLimit", InputType::int(), true),
            ])
            .with_query_info(QueryInfo {
                model: EntityKind::MemberType,
                tag: QueryTag::CreateOne,
            }),
            field(
                "updateMemberType",
                OutputType::non_list(OutputType::object(MEMBER_TYPE)),
            )
            .nullable()
            .with_arguments(vec![
                InputField::new("id", member_type_id(), true),
                InputField::new("discount", InputType::float(), false),
                InputField::new("monthPostsLimit", InputType::int(), false),
            ])
            .with_query_info(QueryInfo {
                model: EntityKind::MemberType,
                tag: QueryTag::UpdateOne,
            }),
            field(
                "deleteMemberType",
                OutputType::non_list(OutputType::object(MEMBER_TYPE)),
            )
            .nullable()
            .with_arguments(vec![InputField::new("id", member_type_id(), true)])
            .with_query_info(QueryInfo {
                model: EntityKind::MemberType,
                tag: QueryTag::DeleteOne,
            }),
            field(
                "subscribeTo",
                OutputType::non_list(OutputType::object(USER)),
            )
            .nullable()
            .with_arguments(vec![
                InputField::new("subscriberId", InputType::uuid(), true),
                InputField::new("authorId", InputType::uuid(), true),
            ])
            .with_query_info(QueryInfo {
                model: EntityKind::Subscription,
                tag: QueryTag::Subscribe,
            }),
            field(
                "unsubscribeFrom",
                OutputType::non_list(OutputType::object(USER)),
            )
            .nullable()
            .with_arguments(vec![
                InputField::new("subscriberId", InputType::uuid(), true),
                InputField::new("authorId", InputType::uuid(), true),
            ])
            .with_query_info(QueryInfo {
                model: EntityKind::Subscription,
                tag: QueryTag::Unsubscribe,
            }),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_objects_expose_the_declared_entry_points() {
        let schema = build(crate::DEFAULT_MAX_DEPTH);
        let query = schema.object(schema.query_object());
        let mutation = schema.object(schema.mutation_object());

        let query_fields: Vec<_> = query.get_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            query_fields,
            vec![
                "users",
                "user",
                "posts",
                "post",
                "profiles",
                "profile",
                "memberTypes",
                "memberType"
            ]
        );

        assert!(mutation.find_field("subscribeTo").is_some());
        assert!(mutation.find_field("unsubscribeFrom").is_some());
        assert_eq!(mutation.get_fields().len(), 14);
    }

    #[test]
    fn relation_fields_carry_resolvers_and_scalars_do_not() {
        let schema = build(crate::DEFAULT_MAX_DEPTH);
        let (_, user) = schema.find_object_by_name("User").unwrap();

        assert!(user.find_field("profile").unwrap().is_relation());
        assert!(user.find_field("userSubscribedTo").unwrap().is_relation());
        assert!(!user.find_field("balance").unwrap().is_relation());
    }

    #[test]
    fn subscription_fields_close_the_self_referential_cycle() {
        let schema = build(crate::DEFAULT_MAX_DEPTH);
        let (user_id, user) = schema.find_object_by_name("User").unwrap();

        let subscribed = user.find_field("userSubscribedTo").unwrap();
        assert_eq!(subscribed.field_type.as_object_id(), Some(user_id));
        assert!(subscribed.field_type.is_list());
    }

    #[test]
    fn unique_lookups_require_their_id_argument() {
        let schema = build(crate::DEFAULT_MAX_DEPTH);
        let query = schema.object(schema.query_object());
        let user = query.find_field("user").unwrap();

        let id_arg = user.find_argument("id").unwrap();
        assert!(id_arg.is_required);
        assert!(user.is_nullable);
    }
}
