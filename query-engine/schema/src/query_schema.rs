use crate::output_types::{ObjectId, ObjectType};
use social_models::EntityKind;
use std::sync::Arc;

/// Structural nesting allowed in a query document, counting the root
/// selection as depth 1.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// The state machine-relevant part of a root field: which entity it targets
/// and which store/enforcer operation it is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryInfo {
    pub model: EntityKind,
    pub tag: QueryTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTag {
    FindMany,
    FindUnique,
    CreateOne,
    UpdateOne,
    DeleteOne,
    Subscribe,
    Unsubscribe,
}

impl QueryTag {
    pub fn is_write(&self) -> bool {
        !matches!(self, QueryTag::FindMany | QueryTag::FindUnique)
    }
}

/// The query schema. Only an immutable reference is ever handed out after
/// construction; requests share it through [`QuerySchemaRef`].
#[derive(Debug)]
pub struct QuerySchema {
    pub(crate) objects: Vec<ObjectType>,
    pub(crate) query: ObjectId,
    pub(crate) mutation: ObjectId,
    max_depth: usize,
}

pub type QuerySchemaRef = Arc<QuerySchema>;

impl QuerySchema {
    pub(crate) fn new(
        objects: Vec<ObjectType>,
        query: ObjectId,
        mutation: ObjectId,
        max_depth: usize,
    ) -> Self {
        QuerySchema {
            objects,
            query,
            mutation,
            max_depth,
        }
    }

    pub fn object(&self, id: ObjectId) -> &ObjectType {
        &self.objects[id.0]
    }

    pub fn query_object(&self) -> ObjectId {
        self.query
    }

    pub fn mutation_object(&self) -> ObjectId {
        self.mutation
    }

    pub fn find_object_by_name(&self, name: &str) -> Option<(ObjectId, &ObjectType)> {
        self.objects
            .iter()
            .enumerate()
            .find(|(_, object)| object.name() == name)
            .map(|(idx, object)| (ObjectId(idx), object))
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
