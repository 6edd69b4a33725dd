use super::error::{QueryParserError, QueryParserErrorKind, QueryPath};
use super::parse_ast::{FieldPair, ParsedArgument, ParsedField, ParsedObject};
use super::query_value::ArgumentValue;
use super::selection::Selection;
use schema::{InputField, InputType, ObjectId, OutputField, QuerySchema, ScalarType};
use social_models::ScalarValue;

/// Validates a selection tree against the schema graph.
///
/// Unlike a fail-fast parser this one walks the whole document and collects
/// every violation; callers get either a fully parsed tree or the complete
/// error list, never a partial mix. Structural depth is bounded here, before
/// any store work happens, counting the root selection as depth 1.
pub struct QueryDocumentParser;

impl QueryDocumentParser {
    pub fn parse(
        schema: &QuerySchema,
        root: ObjectId,
        selections: &[Selection],
    ) -> Result<ParsedObject, Vec<QueryParserError>> {
        let mut errors = Vec::new();
        let parsed = Self::parse_object(schema, root, selections, &QueryPath::default(), 1, &mut errors);

        if errors.is_empty() {
            Ok(parsed)
        } else {
            Err(errors)
        }
    }

    fn parse_object(
        schema: &QuerySchema,
        object_id: ObjectId,
        selections: &[Selection],
        path: &QueryPath,
        depth: usize,
        errors: &mut Vec<QueryParserError>,
    ) -> ParsedObject {
        let object = schema.object(object_id);
        let mut fields = Vec::with_capacity(selections.len());

        for selection in selections {
            let field_path = path.add(selection.response_key().to_owned());

            if depth > schema.max_depth() {
                errors.push(QueryParserError::new(
                    field_path,
                    QueryParserErrorKind::DepthLimitExceeded {
                        depth,
                        max_depth: schema.max_depth(),
                    },
                ));
                continue;
            }

            match object.find_field(selection.name()) {
                Some(schema_field) => {
                    if let Some(pair) =
                        Self::parse_field(schema, schema_field, selection, &field_path, depth, errors)
                    {
                        fields.push(pair);
                    }
                }
                None => errors.push(QueryParserError::new(
                    field_path,
                    QueryParserErrorKind::UnknownSelectionField {
                        field: selection.name().to_owned(),
                        object: object.name().to_owned(),
                    },
                )),
            }
        }

        ParsedObject { fields }
    }

    fn parse_field(
        schema: &QuerySchema,
        schema_field: &OutputField,
        selection: &Selection,
        path: &QueryPath,
        depth: usize,
        errors: &mut Vec<QueryParserError>,
    ) -> Option<FieldPair> {
        let arguments = Self::parse_arguments(schema_field, selection, path, errors);

        let nested_fields = match schema_field.field_type.as_object_id() {
            Some(nested_object) => {
                if selection.nested_selections().is_empty() {
                    errors.push(QueryParserError::new(
                        path.clone(),
                        QueryParserErrorKind::MissingSelectionSet {
                            field: selection.name().to_owned(),
                        },
                    ));
                    return None;
                }

                Some(Self::parse_object(
                    schema,
                    nested_object,
                    selection.nested_selections(),
                    path,
                    depth + 1,
                    errors,
                ))
            }
            None => {
                if !selection.nested_selections().is_empty() {
                    errors.push(QueryParserError::new(
                        path.clone(),
                        QueryParserErrorKind::SelectionSetOnScalar {
                            field: selection.name().to_owned(),
                        },
                    ));
                    return None;
                }

                None
            }
        };

        Some(FieldPair {
            parsed_field: ParsedField {
                name: selection.name().to_owned(),
                alias: selection.alias().map(ToOwned::to_owned),
                arguments,
                nested_fields,
            },
            schema_field: schema_field.clone(),
        })
    }

    fn parse_arguments(
        schema_field: &OutputField,
        selection: &Selection,
        path: &QueryPath,
        errors: &mut Vec<QueryParserError>,
    ) -> Vec<ParsedArgument> {
        for (given_name, _) in selection.arguments() {
            if schema_field.find_argument(given_name).is_none() {
                errors.push(QueryParserError::new(
                    path.add(given_name.clone()),
                    QueryParserErrorKind::UnknownArgument {
                        argument: given_name.clone(),
                    },
                ));
            }
        }

        let mut parsed = Vec::with_capacity(schema_field.arguments.len());

        for schema_arg in &schema_field.arguments {
            let given = selection
                .arguments()
                .iter()
                .find(|(name, _)| name == &schema_arg.name);

            match given {
                Some((_, value)) if value.is_null() && !schema_arg.is_required => {
                    // explicit null on an optional argument means "absent"
                }
                Some((_, value)) if value.is_null() => errors.push(QueryParserError::new(
                    path.add(schema_arg.name.clone()),
                    QueryParserErrorKind::RequiredArgumentMissing {
                        argument: schema_arg.name.clone(),
                    },
                )),
                Some((_, value)) => match Self::coerce_value(value, schema_arg) {
                    Ok(coerced) => parsed.push(ParsedArgument {
                        name: schema_arg.name.clone(),
                        value: coerced,
                    }),
                    Err(got) => errors.push(QueryParserError::new(
                        path.add(schema_arg.name.clone()),
                        QueryParserErrorKind::ValueTypeMismatch {
                            argument: schema_arg.name.clone(),
                            expected: schema_arg.field_type.to_string(),
                            got,
                        },
                    )),
                },
                None if schema_arg.is_required => errors.push(QueryParserError::new(
                    path.add(schema_arg.name.clone()),
                    QueryParserErrorKind::RequiredArgumentMissing {
                        argument: schema_arg.name.clone(),
                    },
                )),
                None => {}
            }
        }

        parsed
    }

    /// Coerces a document value against an input type. Ints widen to floats,
    /// strings parse into UUIDs and enum values; everything else must match
    /// exactly.
    fn coerce_value(value: &ArgumentValue, schema_arg: &InputField) -> Result<ScalarValue, String> {
        let scalar = match value.as_scalar() {
            Some(scalar) => scalar,
            None => return Err(value.type_name().to_owned()),
        };

        match &schema_arg.field_type {
            InputType::Scalar(scalar_type) => match (scalar, scalar_type) {
                (ScalarValue::String(s), ScalarType::String) => Ok(ScalarValue::String(s.clone())),
                (ScalarValue::Boolean(b), ScalarType::Boolean) => Ok(ScalarValue::Boolean(*b)),
                (ScalarValue::Int(i), ScalarType::Int) => Ok(ScalarValue::Int(*i)),
                (ScalarValue::Int(i), ScalarType::Float) => Ok(ScalarValue::Float(*i as f64)),
                (ScalarValue::Float(f), ScalarType::Float) => Ok(ScalarValue::Float(*f)),
                (ScalarValue::Uuid(uuid), ScalarType::Uuid) => Ok(ScalarValue::Uuid(*uuid)),
                (ScalarValue::String(s), ScalarType::Uuid) => s
                    .parse()
                    .map(ScalarValue::Uuid)
                    .map_err(|_| format!("String(\"{s}\")")),
                (other, _) => Err(other.type_name().to_owned()),
            },
            InputType::Enum(enum_type) => match scalar {
                ScalarValue::Enum(v) | ScalarValue::String(v) if enum_type.contains(v) => {
                    Ok(ScalarValue::Enum(v.clone()))
                }
                other => Err(other.type_name().to_owned()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_document::QueryParserErrorKind;

    fn schema() -> QuerySchema {
        schema::build(schema::DEFAULT_MAX_DEPTH)
    }

    fn user_selection(nested: Vec<Selection>) -> Selection {
        Selection::new("users", None, Vec::new(), nested)
    }

    #[test]
    fn valid_selection_parses_into_field_pairs() {
        let schema = schema();
        let selection = user_selection(vec![
            Selection::with_name("id"),
            Selection::with_name("name"),
        ]);

        let parsed =
            QueryDocumentParser::parse(&schema, schema.query_object(), &[selection]).unwrap();

        assert_eq!(parsed.fields.len(), 1);
        let nested = parsed.fields[0].parsed_field.nested_fields.as_ref().unwrap();
        assert_eq!(nested.fields.len(), 2);
    }

    #[test]
    fn all_violations_are_collected_in_one_pass() {
        let schema = schema();
        // unknown nested field + missing required argument on a sibling
        let bad_nested = user_selection(vec![Selection::with_name("nickname")]);
        let missing_arg = Selection::new(
            "user",
            None,
            Vec::new(),
            vec![Selection::with_name("id")],
        );

        let errors = QueryDocumentParser::parse(
            &schema,
            schema.query_object(),
            &[bad_nested, missing_arg],
        )
        .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(matches!(
            errors[0].kind,
            QueryParserErrorKind::UnknownSelectionField { .. }
        ));
        assert!(matches!(
            errors[1].kind,
            QueryParserErrorKind::RequiredArgumentMissing { .. }
        ));
    }

    #[test]
    fn structural_depth_is_bounded_before_execution() {
        let schema = schema();
        // users -> posts -> author -> posts -> author -> posts: depth 6
        let depth_six = user_selection(vec![Selection::new(
            "posts",
            None,
            Vec::new(),
            vec![Selection::new(
                "author",
                None,
                Vec::new(),
                vec![Selection::new(
                    "posts",
                    None,
                    Vec::new(),
                    vec![Selection::new(
                        "author",
                        None,
                        Vec::new(),
                        vec![Selection::new(
                            "posts",
                            None,
                            Vec::new(),
                            vec![Selection::with_name("id")],
                        )],
                    )],
                )],
            )],
        )]);

        let errors =
            QueryDocumentParser::parse(&schema, schema.query_object(), &[depth_six]).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].kind,
            QueryParserErrorKind::DepthLimitExceeded {
                depth: 6,
                max_depth: 5
            }
        ));
    }

    #[test]
    fn depth_five_passes_under_the_default_limit() {
        let schema = schema();
        let depth_five = user_selection(vec![Selection::new(
            "posts",
            None,
            Vec::new(),
            vec![Selection::new(
                "author",
                None,
                Vec::new(),
                vec![Selection::new(
                    "posts",
                    None,
                    Vec::new(),
                    vec![Selection::with_name("id")],
                )],
            )],
        )]);

        assert!(QueryDocumentParser::parse(&schema, schema.query_object(), &[depth_five]).is_ok());
    }

    #[test]
    fn selection_set_on_scalar_is_rejected() {
        let schema = schema();
        let selection = user_selection(vec![Selection::new(
            "balance",
            None,
            Vec::new(),
            vec![Selection::with_name("id")],
        )]);

        let errors =
            QueryDocumentParser::parse(&schema, schema.query_object(), &[selection]).unwrap_err();

        assert!(matches!(
            errors[0].kind,
            QueryParserErrorKind::SelectionSetOnScalar { .. }
        ));
    }

    #[test]
    fn object_fields_require_a_selection_set() {
        let schema = schema();
        let selection = user_selection(vec![Selection::with_name("profile")]);

        let errors =
            QueryDocumentParser::parse(&schema, schema.query_object(), &[selection]).unwrap_err();

        assert!(matches!(
            errors[0].kind,
            QueryParserErrorKind::MissingSelectionSet { .. }
        ));
    }

    #[test]
    fn int_arguments_widen_to_float() {
        let schema = schema();
        let mutation = Selection::new(
            "createUser",
            None,
            vec![
                ("name".to_owned(), ArgumentValue::string("Al")),
                ("balance".to_owned(), ArgumentValue::int(100)),
            ],
            vec![Selection::with_name("id")],
        );

        let parsed =
            QueryDocumentParser::parse(&schema, schema.mutation_object(), &[mutation]).unwrap();
        let field = &parsed.fields[0].parsed_field;

        assert_eq!(
            field.argument("balance"),
            Some(&ScalarValue::Float(100.0))
        );
    }

    #[test]
    fn malformed_uuid_string_is_a_type_mismatch() {
        let schema = schema();
        let selection = Selection::new(
            "user",
            None,
            vec![("id".to_owned(), ArgumentValue::string("not-a-uuid"))],
            vec![Selection::with_name("id")],
        );

        let errors =
            QueryDocumentParser::parse(&schema, schema.query_object(), &[selection]).unwrap_err();

        assert!(matches!(
            errors[0].kind,
            QueryParserErrorKind::ValueTypeMismatch { .. }
        ));
    }
}
