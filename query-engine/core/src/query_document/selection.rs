use super::query_value::ArgumentValue;
use itertools::Itertools;

pub type SelectionArgument = (String, ArgumentValue);

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    name: String,
    alias: Option<String>,
    arguments: Vec<SelectionArgument>,
    nested_selections: Vec<Selection>,
}

impl Selection {
    pub fn with_name(name: impl Into<String>) -> Selection {
        Selection::new(name, None, Vec::new(), Vec::new())
    }

    pub fn new<T, A, N>(name: T, alias: Option<String>, arguments: A, nested_selections: N) -> Self
    where
        T: Into<String>,
        A: Into<Vec<SelectionArgument>>,
        N: Into<Vec<Selection>>,
    {
        Self {
            name: name.into(),
            alias,
            arguments: arguments.into(),
            nested_selections: nested_selections.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn set_alias(&mut self, alias: Option<String>) {
        self.alias = alias;
    }

    /// The key this selection occupies in the response map.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn arguments(&self) -> &[SelectionArgument] {
        &self.arguments
    }

    pub fn push_argument(&mut self, key: impl Into<String>, arg: impl Into<ArgumentValue>) {
        self.arguments.push((key.into(), arg.into()));
    }

    pub fn set_arguments(&mut self, arguments: Vec<SelectionArgument>) {
        self.arguments = arguments;
    }

    pub fn nested_selections(&self) -> &[Self] {
        &self.nested_selections
    }

    pub fn push_nested_selection(&mut self, selection: Selection) {
        self.nested_selections.push(selection);
    }

    pub fn set_nested_selections(&mut self, selections: Vec<Selection>) {
        self.nested_selections = selections;
    }

    /// Collapses duplicate response keys, first occurrence wins, recursively.
    pub fn dedup(mut self) -> Self {
        self.nested_selections = Self::unique_by_key(
            self.nested_selections
                .into_iter()
                .map(Selection::dedup)
                .collect(),
        );
        self
    }

    pub(crate) fn unique_by_key(selections: Vec<Selection>) -> Vec<Selection> {
        selections
            .into_iter()
            .unique_by(|selection| selection.response_key().to_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence_per_response_key() {
        let mut parent = Selection::with_name("user");
        parent.push_nested_selection(Selection::with_name("id"));
        parent.push_nested_selection(Selection::with_name("name"));
        parent.push_nested_selection(Selection::with_name("id"));

        let deduped = parent.dedup();
        let keys: Vec<_> = deduped
            .nested_selections()
            .iter()
            .map(|s| s.response_key())
            .collect();

        assert_eq!(keys, vec!["id", "name"]);
    }

    #[test]
    fn aliased_duplicates_are_distinct_keys() {
        let mut parent = Selection::with_name("user");
        parent.push_nested_selection(Selection::with_name("id"));
        let mut aliased = Selection::with_name("id");
        aliased.set_alias(Some("identifier".into()));
        parent.push_nested_selection(aliased);

        let deduped = parent.dedup();
        assert_eq!(deduped.nested_selections().len(), 2);
    }
}
