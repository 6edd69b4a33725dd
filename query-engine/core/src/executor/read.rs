use super::ResolutionContext;
use crate::error::CoreError;
use crate::query_document::{FieldPair, ParsedField, ParsedObject};
use crate::response_ir::{FieldError, Item, Map};
use memory_connector::DataStore;
use schema::{QueryTag, ResolvedRelation};
use social_models::{EntityKind, Record};

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

    match info.tag {
        QueryTag::FindMany => {
            let records = list_records(ctx.store, info.model)?;
            let nested = nested_object(pair)?;
            Ok(resolve_records(ctx, &records, nested, path))
        }
        QueryTag::FindUnique => {
            let record = find_unique(ctx.store, info.model, &pair.parsed_field)?;
            let nested = nested_object(pair)?;
            Ok(Item::Map(resolve_record(ctx, &record, nested, path)))
        }
        _ => Err(CoreError::internal(
            "write operation dispatched through the read path",
        )),
    }
}

fn list_records(store: &DataStore, model: EntityKind) -> crate::Result<Vec<Record>> {
    let records = match model {
        EntityKind::User => store.users().into_iter().map(Record::User).collect(),
        EntityKind::Post => store.posts().into_iter().map(Record::Post).collect(),
        EntityKind::Profile => store.profiles().into_iter().map(Record::Profile).collect(),
        EntityKind::MemberType => store
            .member_types()
            .into_iter()
            .map(Record::MemberType)
            .collect(),
        EntityKind::Subscription => {
            return Err(CoreError::internal(
                "subscription edges are not directly queryable",
            ))
        }
    };

    Ok(records)
}

fn find_unique(
    store: &DataStore,
    model: EntityKind,
    field: &ParsedField,
) -> crate::Result<Record> {
    let record = match model {
        EntityKind::User => Record::User(store.user(field.required_uuid("id")?)?),
        EntityKind::Post => Record::Post(store.post(field.required_uuid("id")?)?),
        EntityKind::Profile => Record::Profile(store.profile(field.required_uuid("id")?)?),
        EntityKind::MemberType => {
            Record::MemberType(store.member_type(field.required_member_type_id("id")?)?)
        }
        EntityKind::Subscription => {
            return Err(CoreError::internal(
                "subscription edges are not directly queryable",
            ))
        }
    };

    Ok(record)
}

pub(crate) fn resolve_records(
    ctx: &mut ResolutionContext<'_>,
    records: &[Record],
    nested: &ParsedObject,
    path: &[String],
) -> Item {
    let items = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut element_path = path.to_vec();
            element_path.push(index.to_string());
            Item::Map(resolve_record(ctx, record, nested, &element_path))
        })
        .collect();

    Item::List(items)
}

/// Resolves one record's selection set. A failed field is recorded at its
/// position and nulled; siblings keep resolving.
pub(crate) fn resolve_record(
    ctx: &mut ResolutionContext<'_>,
    record: &Record,
    nested: &ParsedObject,
    path: &[String],
) -> Map {
    let mut map = Map::with_capacity(nested.fields.len());

    for pair in &nested.fields {
        let key = pair.parsed_field.response_key().to_owned();
        let mut field_path = path.to_vec();
        field_path.push(key.clone());

        match resolve_field(ctx, record, pair, &field_path) {
            Ok(item) => {
                map.insert(key, item);
            }
            Err(error) => {
                ctx.errors.push(FieldError::new(field_path, error));
                map.insert(key, Item::null());
            }
        }
    }

    map
}

fn resolve_field(
    ctx: &mut ResolutionContext<'_>,
    record: &Record,
    pair: &FieldPair,
    path: &[String],
) -> crate::Result<Item> {
    ctx.check_deadline()?;

    match pair.schema_field.resolver {
        None => record
            .scalar(&pair.parsed_field.name)
            .map(Item::Value)
            .ok_or_else(|| {
                CoreError::internal(format!(
                    "no scalar field `{}` on {}",
                    pair.parsed_field.name,
                    record.kind()
                ))
            }),
        Some(resolver) => match resolver(ctx.store, record)? {
            ResolvedRelation::One(None) => Ok(Item::null()),
            ResolvedRelation::One(Some(related)) => {
                let nested = nested_object(pair)?;
                Ok(Item::Map(resolve_record(ctx, &related, nested, path)))
            }
            ResolvedRelation::Many(related) => {
                let nested = nested_object(pair)?;
                Ok(resolve_records(ctx, &related, nested, path))
            }
        },
    }
}

pub(crate) fn nested_object(pair: &FieldPair) -> crate::Result<&ParsedObject> {
    pair.parsed_field.nested_fields.as_ref().ok_or_else(|| {
        CoreError::internal(format!(
            "object field `{}` was validated without a selection set",
            pair.parsed_field.name
        ))
    })
}
