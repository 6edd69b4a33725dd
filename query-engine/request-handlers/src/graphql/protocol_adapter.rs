use crate::error::HandlerError;
use graphql_parser::query::{
    parse_query, Definition, Document, OperationDefinition, Selection as GqlSelection,
    SelectionSet, Value,
};
use query_core::{ArgumentValue, ArgumentValueObject, Operation, Selection};

type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Protocol adapter for GraphQL → query document.
///
/// Mapping:
/// - A `query { ... }` or bare selection block becomes a read operation, a
///   `mutation { ... }` a write operation.
/// - If the body names an operation, only the matching operation is picked;
///   otherwise the first one in the document wins.
/// - Field arguments become `ArgumentValue`s; variable references are
///   substituted from the body's JSON variable map here, before validation.
///
/// Unsupported (rejected, not ignored): fragments in any form, subscription
/// operations, directives.
pub struct GraphQlProtocolAdapter;

impl GraphQlProtocolAdapter {
    pub fn convert(query: &str, operation_name: Option<&str>, variables: &JsonMap) -> crate::Result<Operation> {
        let document = parse_query::<String>(query)?;

        Self::convert_document(document, operation_name, variables)
    }

    fn convert_document(
        document: Document<'_, String>,
        operation_name: Option<&str>,
        variables: &JsonMap,
    ) -> crate::Result<Operation> {
        let mut operations = Vec::new();

        for definition in document.definitions {
            match definition {
                Definition::Fragment(fragment) => {
                    return Err(HandlerError::unsupported_feature(
                        "Fragment definition",
                        format!("Fragment `{}`, at position {}.", fragment.name, fragment.position),
                    ))
                }
                Definition::Operation(operation) => operations.push(operation),
            }
        }

        let operation = match operation_name {
            Some(name) => operations
                .into_iter()
                .find(|op| Self::matches_operation(op, name))
                .ok_or_else(|| {
                    HandlerError::query_conversion(format!(
                        "Operation `{name}` does not match any operation in the document."
                    ))
                })?,
            None => operations
                .into_iter()
                .next()
                .ok_or_else(|| HandlerError::query_conversion("Document contains no operations."))?,
        };

        Self::convert_operation(operation, variables)
    }

    fn convert_operation(
        operation: OperationDefinition<'_, String>,
        variables: &JsonMap,
    ) -> crate::Result<Operation> {
        match operation {
            OperationDefinition::SelectionSet(selection_set) => Ok(Operation::query(
                Self::convert_selection_set(selection_set, variables)?,
            )),
            OperationDefinition::Query(query) => {
                if !query.directives.is_empty() {
                    return Err(HandlerError::unsupported_feature(
                        "Directives",
                        format!("At position {}.", query.position),
                    ));
                }
                Ok(Operation::query(Self::convert_selection_set(
                    query.selection_set,
                    variables,
                )?))
            }
            OperationDefinition::Mutation(mutation) => {
                if !mutation.directives.is_empty() {
                    return Err(HandlerError::unsupported_feature(
                        "Directives",
                        format!("At position {}.", mutation.position),
                    ));
                }
                Ok(Operation::mutation(Self::convert_selection_set(
                    mutation.selection_set,
                    variables,
                )?))
            }
            OperationDefinition::Subscription(subscription) => Err(HandlerError::unsupported_feature(
                "Subscription operation",
                format!("At position {}.", subscription.position),
            )),
        }
    }

    fn convert_selection_set(
        selection_set: SelectionSet<'_, String>,
        variables: &JsonMap,
    ) -> crate::Result<Vec<Selection>> {
        selection_set
            .items
            .into_iter()
            .map(|item| match item {
                GqlSelection::Field(field) => {
                    if !field.directives.is_empty() {
                        return Err(HandlerError::unsupported_feature(
                            "Directives",
                            format!("On field `{}`, at position {}.", field.name, field.position),
                        ));
                    }

                    let arguments = field
                        .arguments
                        .into_iter()
                        .map(|(name, value)| Ok((name, Self::convert_value(value, variables)?)))
                        .collect::<crate::Result<Vec<_>>>()?;
                    let nested_selections =
                        Self::convert_selection_set(field.selection_set, variables)?;

                    Ok(Selection::new(
                        field.name,
                        field.alias,
                        arguments,
                        nested_selections,
                    ))
                }

                GqlSelection::FragmentSpread(spread) => Err(HandlerError::unsupported_feature(
                    "Fragment spread",
                    format!(
                        "Fragment `{}`, at position {}.",
                        spread.fragment_name, spread.position
                    ),
                )),

                GqlSelection::InlineFragment(inline) => Err(HandlerError::unsupported_feature(
                    "Inline fragment",
                    format!("At position {}.", inline.position),
                )),
            })
            .collect()
    }

    fn matches_operation(definition: &OperationDefinition<'_, String>, operation: &str) -> bool {
        let check = |name: Option<&String>| name.map(String::as_str) == Some(operation);
        match definition {
            OperationDefinition::SelectionSet(_) => false,
            OperationDefinition::Query(query) => check(query.name.as_ref()),
            OperationDefinition::Mutation(mutation) => check(mutation.name.as_ref()),
            OperationDefinition::Subscription(subscription) => check(subscription.name.as_ref()),
        }
    }

    fn convert_value(
        value: Value<'_, String>,
        variables: &JsonMap,
    ) -> crate::Result<ArgumentValue> {
        match value {
            Value::Variable(name) => match variables.get(&name) {
                Some(json) => ArgumentValue::try_from(json.clone())
                    .map_err(HandlerError::query_conversion),
                None => Err(HandlerError::UndefinedVariable { name }),
            },
            Value::Int(i) => match i.as_i64() {
                Some(i) => Ok(ArgumentValue::int(i)),
                None => Err(HandlerError::query_conversion(format!(
                    "Invalid 64 bit integer: {i:?}"
                ))),
            },
            Value::Float(f) => Ok(ArgumentValue::float(f)),
            Value::String(s) => Ok(ArgumentValue::string(s)),
            Value::Boolean(b) => Ok(ArgumentValue::boolean(b)),
            Value::Null => Ok(ArgumentValue::null()),
            Value::Enum(e) => Ok(ArgumentValue::enum_value(e)),
            Value::List(values) => {
                let values = values
                    .into_iter()
                    .map(|value| Self::convert_value(value, variables))
                    .collect::<crate::Result<Vec<ArgumentValue>>>()?;

                Ok(ArgumentValue::list(values))
            }
            Value::Object(map) => {
                let values = map
                    .into_iter()
                    .map(|(k, v)| Self::convert_value(v, variables).map(|v| (k, v)))
                    .collect::<crate::Result<ArgumentValueObject>>()?;

                Ok(ArgumentValue::Object(values))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_core::OperationType;

    fn no_vars() -> JsonMap {
        JsonMap::new()
    }

    #[test]
    fn bare_selection_sets_are_read_operations() {
        let operation =
            GraphQlProtocolAdapter::convert("{ users { id } }", None, &no_vars()).unwrap();

        assert_eq!(operation.operation_type, OperationType::Query);
        assert_eq!(operation.selections.len(), 1);
        assert_eq!(operation.selections[0].name(), "users");
    }

    #[test]
    fn named_operations_are_selected_by_name() {
        let document = "query A { users { id } } mutation B { deleteUser(id: \"x\") { id } }";

        let operation = GraphQlProtocolAdapter::convert(document, Some("B"), &no_vars()).unwrap();
        assert_eq!(operation.operation_type, OperationType::Mutation);

        let operation = GraphQlProtocolAdapter::convert(document, None, &no_vars()).unwrap();
        assert_eq!(operation.operation_type, OperationType::Query);
    }

    #[test]
    fn variables_substitute_into_arguments() {
        let mut variables = JsonMap::new();
        variables.insert("userName".to_owned(), serde_json::json!("Al"));

        let operation = GraphQlProtocolAdapter::convert(
            "mutation($userName: String!) { createUser(name: $userName, balance: 0) { id } }",
            None,
            &variables,
        )
        .unwrap();

        let (name, value) = &operation.selections[0].arguments()[0];
        assert_eq!(name, "name");
        assert_eq!(value, &ArgumentValue::string("Al"));
    }

    #[test]
    fn undefined_variables_are_rejected() {
        let err = GraphQlProtocolAdapter::convert(
            "{ user(id: $missing) { id } }",
            None,
            &no_vars(),
        )
        .unwrap_err();

        assert!(matches!(err, HandlerError::UndefinedVariable { ref name } if name == "missing"));
    }

    #[test]
    fn fragments_are_unsupported() {
        let err = GraphQlProtocolAdapter::convert(
            "fragment F on User { id } { users { ...F } }",
            None,
            &no_vars(),
        )
        .unwrap_err();

        assert!(matches!(err, HandlerError::UnsupportedFeature { .. }));
    }

    #[test]
    fn malformed_documents_are_syntax_errors() {
        let err = GraphQlProtocolAdapter::convert("{ users { id }", None, &no_vars()).unwrap_err();

        assert!(matches!(err, HandlerError::Syntax(_)));
    }
}
