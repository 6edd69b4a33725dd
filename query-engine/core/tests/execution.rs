//! Executor pipeline tests: operations built programmatically, run against a
//! seeded in-memory store.

use memory_connector::{DataStore, IntegrityEnforcer};
use pretty_assertions::assert_eq;
use query_core::{
    ArgumentValue, CoreError, Item, Operation, QueryExecutor, Selection,
};
use social_models::prelude::*;
use std::sync::Arc;
use std::time::Instant;

fn seeded() -> (Arc<DataStore>, User) {
    let store = Arc::new(DataStore::new());
    store
        .create_member_type(MemberTypeCreateInput {
            id: MemberTypeId::Basic,
            discount: 2.5,
            month_posts_limit: 10,
        })
        .unwrap();
    let user = store.create_user(UserCreateInput {
        name: "Al".into(),
        balance: 100.0,
    });
    (store, user)
}

fn selection(name: &str, arguments: Vec<(String, ArgumentValue)>, nested: Vec<Selection>) -> Selection {
    Selection::new(name, None, arguments, nested)
}

#[test]
fn find_many_returns_every_record() {
    let (store, _) = seeded();
    store.create_user(UserCreateInput {
        name: "Bo".into(),
        balance: 0.0,
    });
    let executor = QueryExecutor::new(store);
    let schema = schema::build_default();

    let operation = Operation::query(vec![selection(
        "users",
        vec![],
        vec![Selection::with_name("name")],
    )]);
    let response = executor.execute(&schema, operation, None).unwrap();

    assert!(!response.has_errors());
    let users = response.data.get("users").unwrap().as_list().unwrap();
    assert_eq!(users.len(), 2);
}

#[test]
fn nested_relations_resolve_through_the_registry() {
    let (store, user) = seeded();
    let enforcer = IntegrityEnforcer::new(&store);
    enforcer
        .create_profile(ProfileCreateInput {
            is_male: true,
            year_of_birth: 1990,
            user_id: user.id,
            member_type_id: MemberTypeId::Basic,
        })
        .unwrap();
    let executor = QueryExecutor::new(store.clone());
    let schema = schema::build_default();

    let operation = Operation::query(vec![selection(
        "user",
        vec![("id".to_owned(), ArgumentValue::uuid(user.id))],
        vec![selection(
            "profile",
            vec![],
            vec![selection(
                "memberType",
                vec![],
                vec![Selection::with_name("id")],
            )],
        )],
    )]);
    let response = executor.execute(&schema, operation, None).unwrap();

    assert!(!response.has_errors());
    assert_eq!(
        serde_json::to_value(&response.data).unwrap(),
        serde_json::json!({
            "user": { "profile": { "memberType": { "id": "basic" } } }
        })
    );
}

#[test]
fn missing_profile_resolves_to_null_without_error() {
    let (store, user) = seeded();
    let executor = QueryExecutor::new(store);
    let schema = schema::build_default();

    let operation = Operation::query(vec![selection(
        "user",
        vec![("id".to_owned(), ArgumentValue::uuid(user.id))],
        vec![selection("profile", vec![], vec![Selection::with_name("id")])],
    )]);
    let response = executor.execute(&schema, operation, None).unwrap();

    assert!(!response.has_errors());
    assert_eq!(
        serde_json::to_value(&response.data).unwrap(),
        serde_json::json!({ "user": { "profile": null } })
    );
}

#[test]
fn unique_lookup_miss_is_a_field_error_with_null_data() {
    let (store, _) = seeded();
    let executor = QueryExecutor::new(store);
    let schema = schema::build_default();

    let operation = Operation::query(vec![selection(
        "user",
        vec![("id".to_owned(), ArgumentValue::uuid(uuid::Uuid::new_v4()))],
        vec![Selection::with_name("id")],
    )]);
    let response = executor.execute(&schema, operation, None).unwrap();

    assert!(response.data.get("user").unwrap().is_null());
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].path, vec!["user"]);
    assert!(matches!(
        response.errors[0].error,
        CoreError::Connector(ref err) if err.is_not_found()
    ));
}

#[test]
fn validation_failure_aborts_before_execution() {
    let (store, _) = seeded();
    let executor = QueryExecutor::new(store);
    let schema = schema::build_default();

    let operation = Operation::query(vec![selection(
        "users",
        vec![],
        vec![Selection::with_name("nickname")],
    )]);
    let err = executor.execute(&schema, operation, None).unwrap_err();

    match err {
        CoreError::Validation(errors) => assert_eq!(errors.len(), 1),
        other => panic!("expected validation failure, got {other}"),
    }
}

#[test]
fn sibling_fields_survive_a_failed_resolver() {
    let (store, user) = seeded();
    let enforcer = IntegrityEnforcer::new(&store);
    enforcer
        .create_profile(ProfileCreateInput {
            is_male: true,
            year_of_birth: 1990,
            user_id: user.id,
            member_type_id: MemberTypeId::Basic,
        })
        .unwrap();
    // leaf delete leaves the profile's memberTypeId dangling
    store.delete_member_type(MemberTypeId::Basic).unwrap();
    let executor = QueryExecutor::new(store.clone());
    let schema = schema::build_default();

    let operation = Operation::query(vec![selection(
        "profiles",
        vec![],
        vec![
            Selection::with_name("yearOfBirth"),
            selection("memberType", vec![], vec![Selection::with_name("id")]),
        ],
    )]);
    let response = executor.execute(&schema, operation, None).unwrap();

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].path, vec!["profiles", "0", "memberType"]);
    assert_eq!(
        serde_json::to_value(&response.data).unwrap(),
        serde_json::json!({
            "profiles": [ { "yearOfBirth": 1990, "memberType": null } ]
        })
    );
}

#[test]
fn mutations_commit_through_the_enforcer() {
    let (store, user) = seeded();
    let executor = QueryExecutor::new(store.clone());
    let schema = schema::build_default();

    let operation = Operation::mutation(vec![selection(
        "createPost",
        vec![
            ("title".to_owned(), ArgumentValue::string("hello")),
            ("content".to_owned(), ArgumentValue::string("world")),
            ("authorId".to_owned(), ArgumentValue::uuid(user.id)),
        ],
        vec![Selection::with_name("title")],
    )]);
    let response = executor.execute(&schema, operation, None).unwrap();

    assert!(!response.has_errors());
    assert_eq!(store.posts_by_author(user.id).len(), 1);
}

#[test]
fn duplicate_subscription_mutation_reports_a_field_error() {
    let (store, user) = seeded();
    let author = store.create_user(UserCreateInput {
        name: "Bo".into(),
        balance: 0.0,
    });
    let executor = QueryExecutor::new(store.clone());
    let schema = schema::build_default();

    let subscribe = || {
        Operation::mutation(vec![selection(
            "subscribeTo",
            vec![
                ("subscriberId".to_owned(), ArgumentValue::uuid(user.id)),
                ("authorId".to_owned(), ArgumentValue::uuid(author.id)),
            ],
            vec![Selection::with_name("id")],
        )])
    };

    let first = executor.execute(&schema, subscribe(), None).unwrap();
    assert!(!first.has_errors());

    let second = executor.execute(&schema, subscribe(), None).unwrap();
    assert_eq!(second.errors.len(), 1);
    assert!(second.data.get("subscribeTo").unwrap().is_null());
}

#[test]
fn expired_deadline_reports_deadline_errors_without_resolving() {
    let (store, _) = seeded();
    let executor = QueryExecutor::new(store);
    let schema = schema::build_default();

    let operation = Operation::query(vec![
        selection("users", vec![], vec![Selection::with_name("id")]),
        selection("posts", vec![], vec![Selection::with_name("id")]),
    ]);
    let response = executor
        .execute(&schema, operation, Some(Instant::now()))
        .unwrap();

    assert_eq!(response.errors.len(), 2);
    assert!(response
        .errors
        .iter()
        .all(|err| matches!(err.error, CoreError::DeadlineExceeded)));
    assert!(response.data.get("users").unwrap().is_null());
    assert!(response.data.get("posts").unwrap().is_null());
}

#[test]
fn repeated_fields_resolve_once_per_parent() {
    let (store, _) = seeded();
    let executor = QueryExecutor::new(store);
    let schema = schema::build_default();

    let operation = Operation::query(vec![selection(
        "users",
        vec![],
        vec![
            Selection::with_name("name"),
            Selection::with_name("name"),
        ],
    )]);
    let response = executor.execute(&schema, operation, None).unwrap();

    let users = response.data.get("users").unwrap().as_list().unwrap();
    let first = match &users[0] {
        Item::Map(map) => map,
        other => panic!("expected a map, got {other:?}"),
    };
    assert_eq!(first.len(), 1);
}
