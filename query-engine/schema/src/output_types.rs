use crate::enum_type::EnumType;
use crate::input_types::InputField;
use crate::query_schema::QueryInfo;
use crate::resolvers::RelationResolver;
use std::fmt;

/// Index of an object type in the schema's arena. The object set is closed
/// and known at build time, so cyclic references (User ↔ User through the
/// subscription fields, Post ↔ User) go through indices instead of lazy
/// initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Boolean,
    Int,
    Float,
    Uuid,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::String => f.write_str("String"),
            ScalarType::Boolean => f.write_str("Boolean"),
            ScalarType::Int => f.write_str("Int"),
            ScalarType::Float => f.write_str("Float"),
            ScalarType::Uuid => f.write_str("UUID"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputType {
    is_list: bool,
    pub inner: InnerOutputType,
}

#[derive(Debug, Clone)]
pub enum InnerOutputType {
    Enum(EnumType),
    Object(ObjectId),
    Scalar(ScalarType),
}

impl OutputType {
    pub fn non_list(inner: InnerOutputType) -> Self {
        OutputType {
            is_list: false,
            inner,
        }
    }

    pub fn list(containing: InnerOutputType) -> Self {
        OutputType {
            is_list: true,
            inner: containing,
        }
    }

    pub fn object(containing: ObjectId) -> InnerOutputType {
        InnerOutputType::Object(containing)
    }

    pub fn string() -> InnerOutputType {
        InnerOutputType::Scalar(ScalarType::String)
    }

    pub fn int() -> InnerOutputType {
        InnerOutputType::Scalar(ScalarType::Int)
    }

    pub fn float() -> InnerOutputType {
        InnerOutputType::Scalar(ScalarType::Float)
    }

    pub fn boolean() -> InnerOutputType {
        InnerOutputType::Scalar(ScalarType::Boolean)
    }

    pub fn uuid() -> InnerOutputType {
        InnerOutputType::Scalar(ScalarType::Uuid)
    }

    pub fn enum_type(containing: EnumType) -> InnerOutputType {
        InnerOutputType::Enum(containing)
    }

    pub fn is_list(&self) -> bool {
        self.is_list
    }

    pub fn as_object_id(&self) -> Option<ObjectId> {
        match self.inner {
            InnerOutputType::Object(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self.inner, InnerOutputType::Object(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.inner, InnerOutputType::Scalar(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.inner, InnerOutputType::Enum(_))
    }
}

#[derive(Debug, Clone)]
pub struct ObjectType {
    name: String,
    fields: Vec<OutputField>,
}

impl ObjectType {
    pub(crate) fn new(name: impl Into<String>, fields: Vec<OutputField>) -> Self {
        ObjectType {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_fields(&self) -> &[OutputField] {
        &self.fields
    }

    pub fn find_field(&self, name: &str) -> Option<&OutputField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Clone)]
pub struct OutputField {
    pub name: String,
    pub field_type: OutputType,

    /// Whether the field may resolve to null in the response.
    pub is_nullable: bool,

    pub arguments: Vec<InputField>,

    /// Present on root fields only; drives top-level dispatch.
    pub query_info: Option<QueryInfo>,

    /// Present on relation fields only; the registry entry producing the
    /// related record(s) from the parent record via the entity store.
    pub resolver: Option<RelationResolver>,
}

impl fmt::Debug for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputField")
            .field("name", &self.name)
            .field("is_nullable", &self.is_nullable)
            .field("query_info", &self.query_info)
            .finish_non_exhaustive()
    }
}

impl OutputField {
    pub(crate) fn new(name: impl Into<String>, field_type: OutputType) -> Self {
        OutputField {
            name: name.into(),
            field_type,
            is_nullable: false,
            arguments: Vec::new(),
            query_info: None,
            resolver: None,
        }
    }

    pub(crate) fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub(crate) fn with_arguments(mut self, arguments: Vec<InputField>) -> Self {
        self.arguments = arguments;
        self
    }

    pub(crate) fn with_query_info(mut self, info: QueryInfo) -> Self {
        self.query_info = Some(info);
        self
    }

    pub(crate) fn with_resolver(mut self, resolver: RelationResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn is_relation(&self) -> bool {
        self.resolver.is_some()
    }

    pub fn find_argument(&self, name: &str) -> Option<&InputField> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}
