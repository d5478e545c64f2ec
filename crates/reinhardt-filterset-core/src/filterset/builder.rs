//! Filterset construction

use super::FilterSet;
use super::derive::{Fields, derive_filters};
use crate::choices::ChoiceSet;
use crate::error::{ConfigurationError, FilterSetResult};
use crate::filter::{Filter, Resolver};
use crate::query::Queryable;
use crate::schema::Schema;
use crate::settings::FilterSettings;
use crate::value::FilterValue;
use indexmap::IndexMap;
use std::sync::Arc;

/// Collects declarations and validates them in [`build`](Self::build)
///
/// Nothing is checked until `build`, so declarations may be given in any order.
pub struct FilterSetBuilder<Q> {
	declared: Vec<(String, Filter<Q>)>,
	ordering: Option<Filter<Q>>,
	methods: IndexMap<String, Resolver<Q>>,
	settings: FilterSettings,
	schema: Option<(Schema, Fields)>,
	exclude: Vec<String>,
}

impl<Q> Default for FilterSetBuilder<Q> {
	fn default() -> Self {
		Self {
			declared: Vec::new(),
			ordering: None,
			methods: IndexMap::new(),
			settings: FilterSettings::default(),
			schema: None,
			exclude: Vec::new(),
		}
	}
}

impl<Q: Queryable> FilterSetBuilder<Q> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declare a filter under `name`
	pub fn filter(mut self, name: impl Into<String>, filter: Filter<Q>) -> Self {
		self.declared.push((name.into(), filter));
		self
	}

	/// Declare the ordering filter under the settings' ordering parameter
	pub fn ordering(mut self, filter: Filter<Q>) -> Self {
		self.ordering = Some(filter);
		self
	}

	/// Register a resolver that filters refer to by name
	///
	/// A method named `filter_<name>` is also attached to the filter called `<name>` when
	/// that filter has no resolver of its own.
	pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
	where
		F: Fn(Q, &FilterValue) -> Q + Send + Sync + 'static,
	{
		self.methods.insert(name.into(), Arc::new(method));
		self
	}

	pub fn settings(mut self, settings: FilterSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Derive filters from `schema` for the selected fields
	pub fn schema(mut self, schema: Schema, fields: Fields) -> Self {
		self.schema = Some((schema, fields));
		self
	}

	/// Schema fields never derived
	pub fn exclude_fields<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.exclude.extend(names.into_iter().map(Into::into));
		self
	}

	/// Validate every declaration and produce the filterset
	///
	/// # Errors
	///
	/// Returns the first [`ConfigurationError`] found: empty or duplicate names,
	/// unknown schema fields, unresolved methods, missing choices or choice sources,
	/// ordering filters without fields, and lookups the queryable does not support.
	pub fn build(self) -> FilterSetResult<FilterSet<Q>> {
		let Self {
			declared,
			ordering,
			methods,
			settings,
			schema,
			exclude,
		} = self;

		let mut filters: IndexMap<String, Filter<Q>> = IndexMap::new();
		if let Some((schema, fields)) = &schema {
			for (name, filter) in derive_filters(schema, fields, &exclude, &settings)? {
				filters.insert(name, filter);
			}
		}
		let derived = filters.len();

		let mut seen: Vec<String> = Vec::with_capacity(declared.len() + 1);
		let ordering = ordering.map(|filter| (settings.ordering_param.clone(), filter));
		for (name, filter) in declared.into_iter().chain(ordering) {
			if name.trim().is_empty() {
				return Err(ConfigurationError::EmptyName);
			}
			if seen.contains(&name) {
				return Err(ConfigurationError::DuplicateName { name });
			}
			seen.push(name.clone());
			// Replaces a derived filter in place, otherwise appends
			filters.insert(name, filter);
		}

		for (name, filter) in filters.iter_mut() {
			filter.apply_settings(&settings);
			attach_method(name, filter, &methods)?;
			validate(name, filter)?;
		}

		tracing::debug!(
			filters = filters.len(),
			derived,
			declared = seen.len(),
			"built filterset"
		);

		Ok(FilterSet {
			filters,
			settings: Arc::new(settings),
		})
	}
}

fn attach_method<Q>(
	name: &str,
	filter: &mut Filter<Q>,
	methods: &IndexMap<String, Resolver<Q>>,
) -> FilterSetResult<()> {
	if let Some(method) = &filter.method_name {
		let resolver = methods
			.get(method)
			.ok_or_else(|| ConfigurationError::UnknownMethod {
				name: name.to_string(),
				method: method.clone(),
			})?;
		filter.resolver = Some(Arc::clone(resolver));
	} else if filter.resolver.is_none()
		&& let Some(resolver) = methods.get(&format!("filter_{name}"))
	{
		filter.resolver = Some(Arc::clone(resolver));
	}
	Ok(())
}

fn validate<Q: Queryable>(name: &str, filter: &Filter<Q>) -> FilterSetResult<()> {
	let kind = filter.kind();

	if kind.needs_source() && filter.choices.is_none() {
		return Err(ConfigurationError::MissingChoiceSource {
			name: name.to_string(),
		});
	}
	if kind.is_choice() && !kind.needs_source() {
		let empty = match &filter.choices {
			ChoiceSet::None => true,
			ChoiceSet::Static(choices) => choices.is_empty(),
			ChoiceSet::Source(_) => false,
		};
		if empty {
			return Err(ConfigurationError::MissingChoices {
				name: name.to_string(),
			});
		}
	}
	if filter.ordering_config().is_some_and(|config| config.is_empty()) {
		return Err(ConfigurationError::MissingOrderingFields {
			name: name.to_string(),
		});
	}

	if filter.resolver.is_none()
		&& let Some(used) = filter.used_lookups()
		&& let Some(lookup) = used.into_iter().find(|lookup| !Q::supports_lookup(lookup))
	{
		return Err(ConfigurationError::UnsupportedLookup {
			name: name.to_string(),
			lookup,
		});
	}
	Ok(())
}
