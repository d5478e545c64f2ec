//! Schema descriptions used for filter auto-derivation

use crate::choices::{ChoiceSource, Choices};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Storage type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
	Char,
	Text,
	Slug,
	Email,
	Url,
	Boolean,
	NullBoolean,
	Integer,
	BigInteger,
	SmallInteger,
	PositiveInteger,
	Float,
	Decimal,
	Date,
	DateTime,
	Time,
	Uuid,
	ForeignKey,
	OneToOne,
	ManyToMany,
}

impl FieldType {
	pub fn is_relation(self) -> bool {
		matches!(self, Self::ForeignKey | Self::OneToOne | Self::ManyToMany)
	}
}

#[derive(Clone)]
pub struct SchemaField {
	pub name: String,
	pub field_type: FieldType,
	/// Enumerated values; a field with choices derives a choice filter
	pub choices: Option<Choices>,
	/// Rows of the related table, for relation fields
	pub related: Option<Arc<dyn ChoiceSource>>,
	pub verbose_name: Option<String>,
}

impl SchemaField {
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			choices: None,
			related: None,
			verbose_name: None,
		}
	}

	pub fn with_choices(mut self, choices: impl Into<Choices>) -> Self {
		self.choices = Some(choices.into());
		self
	}

	pub fn with_related(mut self, source: impl ChoiceSource + 'static) -> Self {
		self.related = Some(Arc::new(source));
		self
	}

	pub fn with_verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
		self.verbose_name = Some(verbose_name.into());
		self
	}
}

impl fmt::Debug for SchemaField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SchemaField")
			.field("name", &self.name)
			.field("field_type", &self.field_type)
			.field("choices", &self.choices)
			.field("related", &self.related.is_some())
			.field("verbose_name", &self.verbose_name)
			.finish()
	}
}

/// A named table and its fields, in declaration order
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::schema::{FieldType, Schema, SchemaField};
///
/// let schema = Schema::new("book")
///     .field(SchemaField::new("title", FieldType::Char))
///     .field(SchemaField::new("price", FieldType::Decimal));
///
/// assert_eq!(schema.field_names().collect::<Vec<_>>(), ["title", "price"]);
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
	pub name: String,
	fields: IndexMap<String, SchemaField>,
}

impl Schema {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			fields: IndexMap::new(),
		}
	}

	pub fn field(mut self, field: SchemaField) -> Self {
		self.fields.insert(field.name.clone(), field);
		self
	}

	pub fn get(&self, name: &str) -> Option<&SchemaField> {
		self.fields.get(name)
	}

	pub fn fields(&self) -> impl Iterator<Item = &SchemaField> {
		self.fields.values()
	}

	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.keys().map(String::as_str)
	}
}
