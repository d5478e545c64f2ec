//! Declarative filters
//!
//! A [`Filter`] turns the raw parameter values bound to its name into at most one
//! contribution to a [`Queryable`]: a predicate applied through `filter` or `exclude`,
//! a custom resolver call, or an ordering. Resolution runs in a fixed order:
//!
//! 1. absent (or blank) parameters leave the queryable untouched
//! 2. values are decoded with the filter's [`ValueCodec`]
//! 3. decoded values are validated against the filter's choices
//! 4. multiple-choice filters with `always_filter == false` detect no-op selections
//! 5. the predicate is built and applied, honouring `negate` and `distinct`
//!
//! A custom resolver receives the decoded value right after step 2 and replaces the
//! remaining steps.

pub mod kinds;
pub mod ordering;
pub mod preset;
pub mod range;

pub use kinds::FilterKind;
pub use ordering::OrderingConfig;
pub use preset::{Clock, DatePreset};
pub use range::RangeConfig;

use crate::choices::{ChoiceSet, ChoiceSource, Choices};
use crate::codec::{SharedCodec, ValueCodec, codec_for_lookup};
use crate::error::{ChoiceValidationError, DecodeError, FieldError};
use crate::lookup::{LookupSpec, lookups};
use crate::params::QueryParams;
use crate::query::{OrderBy, Predicate, Queryable};
use crate::settings::FilterSettings;
use crate::value::FilterValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Custom resolution: receives the queryable and the decoded value
pub type Resolver<Q> = Arc<dyn Fn(Q, &FilterValue) -> Q + Send + Sync>;

/// Post-decode value transform
pub type Coercion = Arc<dyn Fn(FilterValue) -> Result<FilterValue, DecodeError> + Send + Sync>;

/// Decides whether a multiple selection is a no-op: `(selected keys, all choice keys)`
pub type NoopPolicy = Arc<dyn Fn(&[String], &[String]) -> bool + Send + Sync>;

/// How many values a filter consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
	Single,
	Multiple,
	/// Two optional bounds read from `<name><lower_suffix>` and `<name><upper_suffix>`
	PairedRange,
}

/// Default no-op rule: nothing selected, or every available choice selected
pub fn default_noop_policy(selected: &[String], all: &[String]) -> bool {
	selected.is_empty() || (!all.is_empty() && all.iter().all(|key| selected.contains(key)))
}

/// Codec rebuilt from [`FilterSettings`] when the filter joins a filterset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingsCodec {
	Date,
	DateTime,
}

#[derive(Clone)]
pub(crate) enum Mode {
	Lookup,
	Ordering(OrderingConfig),
	DatePreset(Clock),
}

/// What a successful clean hands to `apply`
#[derive(Debug)]
pub(crate) enum Cleaned {
	Predicate(Predicate),
	Resolver(FilterValue),
	Ordering(Vec<OrderBy>),
}

pub struct Filter<Q> {
	pub(crate) target: String,
	pub(crate) lookup: Option<LookupSpec>,
	pub(crate) cardinality: Cardinality,
	pub(crate) kind: FilterKind,
	pub(crate) codec: SharedCodec,
	pub(crate) choices: ChoiceSet,
	pub(crate) null_label: Option<String>,
	pub(crate) null_value: String,
	pub(crate) fallback_lookup: String,
	pub(crate) conjoined: bool,
	pub(crate) always_filter: bool,
	pub(crate) negate: bool,
	pub(crate) distinct: bool,
	pub(crate) required: bool,
	pub(crate) coerce: Option<Coercion>,
	pub(crate) resolver: Option<Resolver<Q>>,
	pub(crate) method_name: Option<String>,
	pub(crate) noop: Option<NoopPolicy>,
	pub(crate) range: RangeConfig,
	pub(crate) label: Option<String>,
	pub(crate) help_text: Option<String>,
	pub(crate) settings_codec: Option<SettingsCodec>,
	pub(crate) mode: Mode,
}

impl<Q> Filter<Q> {
	/// Base constructor used by the typed constructors in [`kinds`]
	pub fn new(
		target: impl Into<String>,
		kind: FilterKind,
		cardinality: Cardinality,
		codec: impl ValueCodec + 'static,
	) -> Self {
		Self {
			target: target.into(),
			lookup: None,
			cardinality,
			kind,
			codec: Arc::new(codec),
			choices: ChoiceSet::None,
			null_label: None,
			null_value: "null".to_string(),
			fallback_lookup: lookups::EXACT.to_string(),
			conjoined: false,
			always_filter: true,
			negate: false,
			distinct: cardinality == Cardinality::Multiple,
			required: false,
			coerce: None,
			resolver: None,
			method_name: None,
			noop: None,
			range: RangeConfig::default(),
			label: None,
			help_text: None,
			settings_codec: None,
			mode: Mode::Lookup,
		}
	}

	pub fn lookup(mut self, lookup: impl Into<LookupSpec>) -> Self {
		self.lookup = Some(lookup.into());
		self
	}

	/// Replace the value codec
	pub fn codec(mut self, codec: impl ValueCodec + 'static) -> Self {
		self.codec = Arc::new(codec);
		self.settings_codec = None;
		self
	}

	pub fn shared_codec(mut self, codec: SharedCodec) -> Self {
		self.codec = codec;
		self.settings_codec = None;
		self
	}

	/// Static choices; the no-op rule compares selections against this list
	pub fn choices(mut self, choices: impl Into<Choices>) -> Self {
		self.choices = ChoiceSet::Static(choices.into());
		self
	}

	/// Choices read on every bind
	pub fn choice_source(mut self, source: impl ChoiceSource + 'static) -> Self {
		self.choices = ChoiceSet::Source(Arc::new(source));
		self
	}

	/// Offer a null option that filters on `isnull`
	pub fn null_label(mut self, label: impl Into<String>) -> Self {
		self.null_label = Some(label.into());
		self
	}

	/// Combine multiple selected values with AND instead of OR
	pub fn conjoined(mut self, conjoined: bool) -> Self {
		self.conjoined = conjoined;
		self
	}

	pub fn always_filter(mut self, always_filter: bool) -> Self {
		self.always_filter = always_filter;
		self
	}

	/// Apply through `exclude` instead of `filter`
	pub fn negate(mut self, negate: bool) -> Self {
		self.negate = negate;
		self
	}

	pub fn distinct(mut self, distinct: bool) -> Self {
		self.distinct = distinct;
		self
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	pub fn coerce<F>(mut self, coerce: F) -> Self
	where
		F: Fn(FilterValue) -> Result<FilterValue, DecodeError> + Send + Sync + 'static,
	{
		self.coerce = Some(Arc::new(coerce));
		self
	}

	pub fn resolver<F>(mut self, resolver: F) -> Self
	where
		F: Fn(Q, &FilterValue) -> Q + Send + Sync + 'static,
	{
		self.resolver = Some(Arc::new(resolver));
		self
	}

	/// Resolve through a method registered on the filterset builder under `name`
	pub fn method(mut self, name: impl Into<String>) -> Self {
		self.method_name = Some(name.into());
		self
	}

	pub fn noop_policy<F>(mut self, policy: F) -> Self
	where
		F: Fn(&[String], &[String]) -> bool + Send + Sync + 'static,
	{
		self.noop = Some(Arc::new(policy));
		self
	}

	/// Parameter suffixes of a paired range, e.g. `("_min", "_max")`
	pub fn suffixes(mut self, lower: impl Into<String>, upper: impl Into<String>) -> Self {
		self.range.lower_suffix = lower.into();
		self.range.upper_suffix = upper.into();
		self
	}

	/// Lookups used when only the lower or only the upper bound is given
	pub fn bound_lookups(mut self, lower: impl Into<String>, upper: impl Into<String>) -> Self {
		self.range.lower_lookup = lower.into();
		self.range.upper_lookup = upper.into();
		self
	}

	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn target(&self) -> &str {
		&self.target
	}

	pub fn lookup_spec(&self) -> Option<&LookupSpec> {
		self.lookup.as_ref()
	}

	pub fn cardinality(&self) -> Cardinality {
		self.cardinality
	}

	pub fn kind(&self) -> FilterKind {
		self.kind
	}

	pub fn value_codec(&self) -> &SharedCodec {
		&self.codec
	}

	pub fn choice_set(&self) -> &ChoiceSet {
		&self.choices
	}

	pub fn is_negated(&self) -> bool {
		self.negate
	}

	pub fn is_required(&self) -> bool {
		self.required
	}

	pub fn is_conjoined(&self) -> bool {
		self.conjoined
	}

	pub fn has_resolver(&self) -> bool {
		self.resolver.is_some()
	}

	pub fn method_name(&self) -> Option<&str> {
		self.method_name.as_deref()
	}

	pub fn range_config(&self) -> &RangeConfig {
		&self.range
	}

	pub fn label_text(&self) -> Option<&str> {
		self.label.as_deref()
	}

	pub fn help(&self) -> Option<&str> {
		self.help_text.as_deref()
	}

	pub fn null_choice(&self) -> Option<&str> {
		self.null_label.as_deref()
	}

	pub(crate) fn ordering_config(&self) -> Option<&OrderingConfig> {
		match &self.mode {
			Mode::Ordering(config) => Some(config),
			_ => None,
		}
	}

	/// Keys carrying values; a filter is absent when all of them are blank
	pub fn value_keys(&self, name: &str) -> Vec<String> {
		match self.cardinality {
			Cardinality::PairedRange => {
				let (lower, upper) = self.range.keys(name);
				vec![lower, upper]
			}
			_ => vec![name.to_string()],
		}
	}

	/// Every parameter key this filter reads
	pub fn param_keys(&self, name: &str) -> Vec<String> {
		let mut keys = self.value_keys(name);
		if self.lookup.as_ref().is_some_and(LookupSpec::is_choosable) {
			keys.push(lookup_param(name));
		}
		keys
	}

	/// Lookup used when no other is chosen
	pub fn default_lookup(&self) -> &str {
		self.lookup
			.as_ref()
			.and_then(LookupSpec::default_lookup)
			.unwrap_or(&self.fallback_lookup)
	}

	/// Every lookup a resolved predicate of this filter may use, `None` if open ended
	pub fn used_lookups(&self) -> Option<Vec<String>> {
		let mut used: Vec<String> = match &self.mode {
			Mode::Ordering(_) => return Some(Vec::new()),
			Mode::DatePreset(_) => vec![lookups::GTE.to_string(), lookups::LT.to_string()],
			Mode::Lookup if self.cardinality == Cardinality::PairedRange => vec![
				self.range.lower_lookup.clone(),
				self.range.upper_lookup.clone(),
				self.range.both_lookup.clone(),
			],
			Mode::Lookup => match &self.lookup {
				Some(spec) => spec.candidates()?.into_iter().map(String::from).collect(),
				None => vec![lookups::EXACT.to_string()],
			},
		};
		if self.null_label.is_some() {
			used.push(lookups::ISNULL.to_string());
		}
		Some(used)
	}

	/// Fill defaults that come from the filterset settings
	pub(crate) fn apply_settings(&mut self, settings: &FilterSettings) {
		self.fallback_lookup = settings.default_lookup_expr.clone();
		if self.lookup.is_none() && matches!(self.mode, Mode::Lookup) {
			self.lookup = Some(LookupSpec::Fixed(settings.default_lookup_expr.clone()));
		}
		match self.settings_codec {
			Some(SettingsCodec::Date) => self.codec = Arc::new(settings.date_codec()),
			Some(SettingsCodec::DateTime) => self.codec = Arc::new(settings.datetime_codec()),
			None => {}
		}
		if self.null_label.is_none() && self.kind.is_choice() {
			self.null_label = settings.null_choice_label.clone();
		}
		self.null_value = settings.null_choice_value.clone();
		if self.help_text.is_none() && !settings.disable_help_text {
			self.help_text = self.kind.default_help_text().map(String::from);
		}
	}

	fn coerce_value(&self, value: FilterValue) -> Result<FilterValue, DecodeError> {
		match &self.coerce {
			Some(coerce) => coerce(value),
			None => Ok(value),
		}
	}

	fn validate_choice(&self, value: &FilterValue, choices: &Choices) -> Result<(), FieldError> {
		match value {
			FilterValue::List(items) => items
				.iter()
				.try_for_each(|item| self.validate_choice(item, choices)),
			other => {
				let key = other.to_key();
				if choices.contains_key(&key) {
					Ok(())
				} else {
					Err(ChoiceValidationError::new(key).into())
				}
			}
		}
	}

	fn is_null_choice(&self, raw: &str) -> bool {
		self.null_label.is_some() && raw == self.null_value
	}

	fn null_predicate(&self) -> Predicate {
		Predicate::compare(self.target.clone(), lookups::ISNULL, true)
	}
}

impl<Q: Queryable> Filter<Q> {
	/// Resolve this filter against `query`
	///
	/// Returns the extended queryable, or the unchanged queryable and the field error when
	/// the bound values are invalid.
	pub fn resolve(&self, name: &str, query: Q, params: &QueryParams) -> (Q, Option<FieldError>) {
		match self.clean(name, params) {
			Ok(Some(cleaned)) => (self.apply(name, query, cleaned), None),
			Ok(None) => (query, None),
			Err(error) => (query, Some(error)),
		}
	}

	pub(crate) fn clean(
		&self,
		name: &str,
		params: &QueryParams,
	) -> Result<Option<Cleaned>, FieldError> {
		let present = self
			.value_keys(name)
			.iter()
			.any(|key| params.get_all(key).iter().any(|raw| !raw.trim().is_empty()));

		if !present {
			if self.required {
				return Err(FieldError::Required);
			}
			tracing::trace!(filter = name, "no value bound, skipping");
			return Ok(None);
		}

		match &self.mode {
			Mode::Ordering(config) => Ok(params
				.get(name)
				.map(|raw| config.clean(raw))
				.transpose()?
				.filter(|terms| !terms.is_empty())
				.map(Cleaned::Ordering)),
			Mode::DatePreset(clock) => self.clean_preset(name, params, clock),
			Mode::Lookup => match self.cardinality {
				Cardinality::Single => self.clean_single(name, params),
				Cardinality::Multiple => self.clean_multiple(name, params),
				Cardinality::PairedRange => self.clean_range(name, params),
			},
		}
	}

	fn selected_lookup(&self, name: &str, params: &QueryParams) -> Result<String, FieldError> {
		let Some(spec @ LookupSpec::Choosable(_)) = &self.lookup else {
			return Ok(self.default_lookup().to_string());
		};
		let chosen = params
			.get(&lookup_param(name))
			.map(str::trim)
			.filter(|raw| !raw.is_empty());

		match chosen {
			Some(lookup) if spec.allows(lookup) && Q::supports_lookup(lookup) => {
				Ok(lookup.to_string())
			}
			Some(lookup) => Err(FieldError::LookupNotAllowed {
				lookup: lookup.to_string(),
			}),
			None => Ok(spec
				.default_lookup()
				.unwrap_or(&self.fallback_lookup)
				.to_string()),
		}
	}

	fn clean_single(&self, name: &str, params: &QueryParams) -> Result<Option<Cleaned>, FieldError> {
		let Some(raw) = params.get(name).map(str::trim).filter(|raw| !raw.is_empty()) else {
			return Ok(None);
		};
		let lookup = self.selected_lookup(name, params)?;

		if self.is_null_choice(raw) {
			return Ok(Some(match self.resolver {
				Some(_) => Cleaned::Resolver(FilterValue::Null),
				None => Cleaned::Predicate(self.null_predicate()),
			}));
		}

		let value = if self.lookup.as_ref().is_some_and(LookupSpec::is_choosable) {
			codec_for_lookup(&lookup, Arc::clone(&self.codec)).decode(raw)?
		} else {
			self.codec.decode(raw)?
		};

		if self.resolver.is_some() {
			return Ok(Some(Cleaned::Resolver(self.coerce_value(value)?)));
		}

		if value.is_null() {
			tracing::trace!(filter = name, "decoded to null, skipping");
			return Ok(None);
		}

		if let Some(choices) = self.choices.resolve() {
			self.validate_choice(&value, &choices)?;
		}

		let value = self.coerce_value(value)?;
		Ok(Some(Cleaned::Predicate(Predicate::compare(
			self.target.clone(),
			lookup,
			value,
		))))
	}

	fn clean_multiple(
		&self,
		name: &str,
		params: &QueryParams,
	) -> Result<Option<Cleaned>, FieldError> {
		let raws: Vec<&str> = params
			.get_all(name)
			.iter()
			.map(|raw| raw.trim())
			.filter(|raw| !raw.is_empty())
			.collect();

		let mut selected: Vec<String> = Vec::with_capacity(raws.len());
		let mut values: Vec<Option<FilterValue>> = Vec::with_capacity(raws.len());
		for raw in raws {
			if self.is_null_choice(raw) {
				selected.push(raw.to_string());
				values.push(None);
				continue;
			}
			let value = self.codec.decode(raw)?;
			selected.push(value.to_key());
			values.push(Some(value));
		}

		if self.resolver.is_some() {
			let list = values
				.into_iter()
				.map(|value| match value {
					Some(value) => self.coerce_value(value),
					None => Ok(FilterValue::Null),
				})
				.collect::<Result<Vec<_>, _>>()?;
			return Ok(Some(Cleaned::Resolver(FilterValue::List(list))));
		}

		let choices = self.choices.resolve();
		if let Some(choices) = &choices {
			for value in values.iter().flatten() {
				self.validate_choice(value, choices)?;
			}
		}

		if !self.always_filter {
			let mut all: Vec<String> = choices
				.as_ref()
				.map(|c| c.keys().map(String::from).collect())
				.unwrap_or_default();
			if self.null_label.is_some() && !all.is_empty() {
				all.push(self.null_value.clone());
			}
			let is_noop = match &self.noop {
				Some(policy) => policy(&selected, &all),
				None => default_noop_policy(&selected, &all),
			};
			if is_noop {
				tracing::trace!(filter = name, "selection is a no-op, skipping");
				return Ok(None);
			}
		}

		let lookup = self.default_lookup().to_string();
		let predicates = values
			.into_iter()
			.map(|value| match value {
				Some(value) => Ok(Predicate::compare(
					self.target.clone(),
					lookup.clone(),
					self.coerce_value(value)?,
				)),
				None => Ok(self.null_predicate()),
			})
			.collect::<Result<Vec<_>, DecodeError>>()?;

		if predicates.is_empty() {
			return Ok(None);
		}

		let combined = if self.conjoined {
			Predicate::and(predicates)
		} else {
			Predicate::or(predicates)
		};
		Ok(Some(Cleaned::Predicate(combined)))
	}

	pub(crate) fn apply(&self, name: &str, query: Q, cleaned: Cleaned) -> Q {
		match cleaned {
			Cleaned::Resolver(value) => match &self.resolver {
				Some(resolver) => {
					tracing::debug!(filter = name, value = %value, "delegating to custom resolver");
					resolver(query, &value)
				}
				None => query,
			},
			Cleaned::Ordering(terms) => {
				tracing::debug!(filter = name, terms = terms.len(), "applying ordering");
				query.order_by(&terms)
			}
			Cleaned::Predicate(predicate) => {
				tracing::debug!(
					filter = name,
					target = %self.target,
					negate = self.negate,
					distinct = self.distinct,
					"applying filter"
				);
				let query = if self.negate {
					query.exclude(predicate)
				} else {
					query.filter(predicate)
				};
				if self.distinct { query.distinct() } else { query }
			}
		}
	}
}

impl<Q> Clone for Filter<Q> {
	fn clone(&self) -> Self {
		Self {
			target: self.target.clone(),
			lookup: self.lookup.clone(),
			cardinality: self.cardinality,
			kind: self.kind,
			codec: Arc::clone(&self.codec),
			choices: self.choices.clone(),
			null_label: self.null_label.clone(),
			null_value: self.null_value.clone(),
			fallback_lookup: self.fallback_lookup.clone(),
			conjoined: self.conjoined,
			always_filter: self.always_filter,
			negate: self.negate,
			distinct: self.distinct,
			required: self.required,
			coerce: self.coerce.clone(),
			resolver: self.resolver.clone(),
			method_name: self.method_name.clone(),
			noop: self.noop.clone(),
			range: self.range.clone(),
			label: self.label.clone(),
			help_text: self.help_text.clone(),
			settings_codec: self.settings_codec,
			mode: self.mode.clone(),
		}
	}
}

impl<Q> fmt::Debug for Filter<Q> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Filter")
			.field("target", &self.target)
			.field("kind", &self.kind)
			.field("lookup", &self.lookup)
			.field("cardinality", &self.cardinality)
			.field("codec", &self.codec.name())
			.field("choices", &self.choices)
			.field("negate", &self.negate)
			.field("distinct", &self.distinct)
			.field("required", &self.required)
			.field("has_resolver", &self.resolver.is_some())
			.finish_non_exhaustive()
	}
}

fn lookup_param(name: &str) -> String {
	format!("{name}_lookup")
}
