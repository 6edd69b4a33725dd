#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    values: Vec<&'static str>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, values: Vec<&'static str>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[&'static str] {
        &self.values
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| *v == value)
    }
}
