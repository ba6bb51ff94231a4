//! Typed block properties and the state space they span.

use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Property values of one block state, keyed by property name.
pub type StateValues = BTreeMap<String, PropertyValue>;

/// A declared block property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(flatten)]
    pub kind: PropertyKind,
}

/// The closed set of property kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PropertyKind {
    /// An integer property with an explicit list of legal values.
    Int { values: Vec<i32> },
    Bool,
    /// An enum property; variant names compare case-insensitively.
    Enum { values: Vec<String> },
}

/// A concrete property value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Int(i32),
    Bool(bool),
    Enum(String),
}

impl Property {
    pub fn int(name: impl Into<String>, values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Int {
                values: values.into_iter().collect(),
            },
        }
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Bool,
        }
    }

    pub fn enumeration<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Enum {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Every legal value, in declaration order. Booleans list `true` first.
    pub fn values(&self) -> Vec<PropertyValue> {
        match &self.kind {
            PropertyKind::Int { values } => values.iter().copied().map(PropertyValue::Int).collect(),
            PropertyKind::Bool => vec![PropertyValue::Bool(true), PropertyValue::Bool(false)],
            PropertyKind::Enum { values } => values
                .iter()
                .map(|v| PropertyValue::Enum(v.to_lowercase()))
                .collect(),
        }
    }

    /// Whether `value` is legal for this property.
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        match (&self.kind, value) {
            (PropertyKind::Int { values }, PropertyValue::Int(v)) => values.contains(v),
            (PropertyKind::Bool, PropertyValue::Bool(_)) => true,
            (PropertyKind::Enum { values }, PropertyValue::Enum(v)) => {
                values.iter().any(|variant| variant.eq_ignore_ascii_case(v))
            }
            _ => false,
        }
    }

    /// `q.block_property('name') == value`, quoting enum values.
    pub fn predicate(&self, value: &PropertyValue) -> String {
        let literal = match (&self.kind, value) {
            (PropertyKind::Enum { .. }, value) => format!("'{}'", value.to_string().to_lowercase()),
            (_, value) => value.to_string(),
        };
        format!("q.block_property('{}') == {}", self.name, literal)
    }
}

impl PropertyValue {
    /// The value as written in state strings and state overrides.
    pub fn normalized(&self) -> PropertyValue {
        match self {
            PropertyValue::Enum(v) => PropertyValue::Enum(v.to_lowercase()),
            other => other.clone(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Int(v) => write!(f, "{}", v),
            PropertyValue::Bool(v) => write!(f, "{}", v),
            PropertyValue::Enum(v) => f.write_str(v),
        }
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Enum(value.to_string())
    }
}

/// The cartesian product of a block's properties.
#[derive(Debug, Clone, Copy)]
pub struct PropertySpace<'a> {
    properties: &'a [Property],
}

impl<'a> PropertySpace<'a> {
    pub fn new(properties: &'a [Property]) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &'a [Property] {
        self.properties
    }

    /// Number of states. A block without properties has exactly one.
    pub fn len(&self) -> usize {
        self.properties
            .iter()
            .map(|p| p.values().len())
            .product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every assignment, first declared property varying slowest.
    pub fn states(&self) -> Vec<StateValues> {
        let mut states = vec![StateValues::new()];
        for property in self.properties {
            let values = property.values();
            states = states
                .into_iter()
                .flat_map(|state| {
                    values.iter().map(move |value| {
                        let mut next = state.clone();
                        next.insert(property.name.clone(), value.clone());
                        next
                    })
                })
                .collect();
        }
        states
    }

    /// Check that `values` assigns a legal value to every declared property
    /// and nothing else.
    pub fn validate(&self, values: &StateValues) -> Result<()> {
        for property in self.properties {
            match values.get(&property.name) {
                Some(value) if property.accepts(value) => {}
                Some(value) => {
                    return Err(BridgeError::InvalidCatalog(format!(
                        "illegal value {} for property {}",
                        value, property.name
                    )))
                }
                None => {
                    return Err(BridgeError::InvalidCatalog(format!(
                        "missing value for property {}",
                        property.name
                    )))
                }
            }
        }

        if let Some(extra) = values
            .keys()
            .find(|name| !self.properties.iter().any(|p| &p.name == *name))
        {
            return Err(BridgeError::InvalidCatalog(format!(
                "undeclared property {}",
                extra
            )));
        }
        Ok(())
    }

    /// The runtime condition selecting this exact assignment, or `None` for
    /// a block without properties.
    ///
    /// Predicates follow declaration order and are joined with `&&`.
    pub fn condition_for(&self, values: &StateValues) -> Result<Option<String>> {
        if self.properties.is_empty() {
            return Ok(None);
        }
        self.validate(values)?;

        let predicates: Vec<String> = self
            .properties
            .iter()
            .filter_map(|property| {
                values
                    .get(&property.name)
                    .map(|value| property.predicate(value))
            })
            .collect();
        Ok(Some(predicates.join(" && ")))
    }
}
