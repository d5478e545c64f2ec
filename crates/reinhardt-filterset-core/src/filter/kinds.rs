//! Typed filter constructors

use super::{Cardinality, Filter, Mode, OrderingConfig, RangeConfig, SettingsCodec, preset};
use crate::choices::Choices;
use crate::codec::{
	BooleanCodec, CsvCodec, DateCodec, DateTimeCodec, DecimalCodec, FloatCodec, IntegerCodec,
	NullBooleanCodec, SharedCodec, TextCodec, TimeCodec, UuidCodec, ValueCodec,
};
use crate::lookup::{LookupSpec, lookups};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const CSV_HELP_TEXT: &str = "Multiple values may be separated by commas.";

/// Which constructor produced a filter, reported in metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
	Char,
	Boolean,
	NullBoolean,
	Number,
	Date,
	DateTime,
	Time,
	Uuid,
	Choice,
	MultipleChoice,
	Relation,
	RelationMultiple,
	AllValues,
	AllValuesMultiple,
	Range,
	DateRange,
	DateTimeRange,
	InList,
	RangeCsv,
	LookupChoice,
	DateRangePreset,
	Ordering,
}

impl FilterKind {
	/// Kinds validated against a choice list
	pub fn is_choice(self) -> bool {
		matches!(
			self,
			Self::Choice
				| Self::MultipleChoice
				| Self::Relation
				| Self::RelationMultiple
				| Self::AllValues
				| Self::AllValuesMultiple
		)
	}

	/// Kinds whose choices come from a [`ChoiceSource`](crate::ChoiceSource)
	pub fn needs_source(self) -> bool {
		matches!(
			self,
			Self::Relation | Self::RelationMultiple | Self::AllValues | Self::AllValuesMultiple
		)
	}

	pub(crate) fn default_help_text(self) -> Option<&'static str> {
		match self {
			Self::InList | Self::RangeCsv => Some(CSV_HELP_TEXT),
			_ => None,
		}
	}
}

impl<Q> Filter<Q> {
	/// Text, `exact` unless a lookup is given
	pub fn char(target: impl Into<String>) -> Self {
		Self::new(target, FilterKind::Char, Cardinality::Single, TextCodec::default())
	}

	pub fn boolean(target: impl Into<String>) -> Self {
		Self::new(target, FilterKind::Boolean, Cardinality::Single, BooleanCodec)
	}

	/// Boolean that also accepts `null`/`unknown`, which skip the filter
	pub fn null_boolean(target: impl Into<String>) -> Self {
		Self::new(
			target,
			FilterKind::NullBoolean,
			Cardinality::Single,
			NullBooleanCodec,
		)
	}

	/// Decimal number
	pub fn number(target: impl Into<String>) -> Self {
		Self::new(target, FilterKind::Number, Cardinality::Single, DecimalCodec)
	}

	pub fn integer(target: impl Into<String>) -> Self {
		Self::new(target, FilterKind::Number, Cardinality::Single, IntegerCodec)
	}

	pub fn float(target: impl Into<String>) -> Self {
		Self::new(target, FilterKind::Number, Cardinality::Single, FloatCodec)
	}

	/// Lenient date following the settings' locale and input formats
	pub fn date(target: impl Into<String>) -> Self {
		let mut filter = Self::new(
			target,
			FilterKind::Date,
			Cardinality::Single,
			DateCodec::lenient(),
		);
		filter.settings_codec = Some(SettingsCodec::Date);
		filter
	}

	pub fn iso_date(target: impl Into<String>) -> Self {
		Self::new(target, FilterKind::Date, Cardinality::Single, DateCodec::iso())
	}

	/// Lenient datetime; day order follows the settings' locale
	pub fn datetime(target: impl Into<String>) -> Self {
		let mut filter = Self::new(
			target,
			FilterKind::DateTime,
			Cardinality::Single,
			DateTimeCodec::lenient(),
		);
		filter.settings_codec = Some(SettingsCodec::DateTime);
		filter
	}

	pub fn iso_datetime(target: impl Into<String>) -> Self {
		Self::new(
			target,
			FilterKind::DateTime,
			Cardinality::Single,
			DateTimeCodec::iso(),
		)
	}

	pub fn time(target: impl Into<String>) -> Self {
		Self::new(target, FilterKind::Time, Cardinality::Single, TimeCodec)
	}

	pub fn uuid(target: impl Into<String>) -> Self {
		Self::new(target, FilterKind::Uuid, Cardinality::Single, UuidCodec)
	}

	/// Single selection validated against `choices`
	pub fn choice(target: impl Into<String>, choices: impl Into<Choices>) -> Self {
		Self::new(
			target,
			FilterKind::Choice,
			Cardinality::Single,
			TextCodec::default(),
		)
		.choices(choices)
	}

	/// Single selection whose values decode with `codec` before validation
	pub fn typed_choice(
		target: impl Into<String>,
		choices: impl Into<Choices>,
		codec: impl ValueCodec + 'static,
	) -> Self {
		Self::new(target, FilterKind::Choice, Cardinality::Single, codec).choices(choices)
	}

	/// Any number of selections, OR-ed unless conjoined
	pub fn multiple_choice(target: impl Into<String>, choices: impl Into<Choices>) -> Self {
		Self::new(
			target,
			FilterKind::MultipleChoice,
			Cardinality::Multiple,
			TextCodec::default(),
		)
		.choices(choices)
	}

	pub fn typed_multiple_choice(
		target: impl Into<String>,
		choices: impl Into<Choices>,
		codec: impl ValueCodec + 'static,
	) -> Self {
		Self::new(target, FilterKind::MultipleChoice, Cardinality::Multiple, codec)
			.choices(choices)
	}

	/// Related object by key; requires a [`choice_source`](Filter::choice_source)
	pub fn relation(target: impl Into<String>) -> Self {
		Self::new(
			target,
			FilterKind::Relation,
			Cardinality::Single,
			TextCodec::default(),
		)
	}

	pub fn relation_multiple(target: impl Into<String>) -> Self {
		Self::new(
			target,
			FilterKind::RelationMultiple,
			Cardinality::Multiple,
			TextCodec::default(),
		)
	}

	/// Any value currently present in the data; requires a choice source
	pub fn all_values(target: impl Into<String>) -> Self {
		Self::new(
			target,
			FilterKind::AllValues,
			Cardinality::Single,
			TextCodec::default(),
		)
	}

	pub fn all_values_multiple(target: impl Into<String>) -> Self {
		Self::new(
			target,
			FilterKind::AllValuesMultiple,
			Cardinality::Multiple,
			TextCodec::default(),
		)
	}

	/// Two optional bounds read from `<name>_0` and `<name>_1`
	pub fn range(target: impl Into<String>, codec: impl ValueCodec + 'static) -> Self {
		Self::new(target, FilterKind::Range, Cardinality::PairedRange, codec)
	}

	/// Decimal bounds read from `<name>_min` and `<name>_max`
	pub fn numeric_range(target: impl Into<String>) -> Self {
		let mut filter = Self::new(
			target,
			FilterKind::Range,
			Cardinality::PairedRange,
			DecimalCodec,
		);
		filter.range = RangeConfig::min_max();
		filter
	}

	/// Date bounds read from `<name>_after` and `<name>_before`
	pub fn date_from_to_range(target: impl Into<String>) -> Self {
		let mut filter = Self::new(
			target,
			FilterKind::DateRange,
			Cardinality::PairedRange,
			DateCodec::lenient(),
		);
		filter.range = RangeConfig::after_before();
		filter.settings_codec = Some(SettingsCodec::Date);
		filter
	}

	pub fn datetime_from_to_range(target: impl Into<String>) -> Self {
		let mut filter = Self::new(
			target,
			FilterKind::DateTimeRange,
			Cardinality::PairedRange,
			DateTimeCodec::lenient(),
		);
		filter.range = RangeConfig::after_before();
		filter.settings_codec = Some(SettingsCodec::DateTime);
		filter
	}

	/// Comma separated values matched with `in`
	pub fn in_list(target: impl Into<String>, base: impl ValueCodec + 'static) -> Self {
		let base: SharedCodec = Arc::new(base);
		Self::new(
			target,
			FilterKind::InList,
			Cardinality::Single,
			CsvCodec::list(base),
		)
		.lookup(lookups::IN)
	}

	/// A `lower,upper` pair matched with `range`
	pub fn range_csv(target: impl Into<String>, base: impl ValueCodec + 'static) -> Self {
		let base: SharedCodec = Arc::new(base);
		Self::new(
			target,
			FilterKind::RangeCsv,
			Cardinality::Single,
			CsvCodec::pair(base),
		)
		.lookup(lookups::RANGE)
	}

	/// Value from `<name>`, lookup picked by the caller through `<name>_lookup`
	///
	/// The first allowed lookup applies when `<name>_lookup` is absent.
	pub fn lookup_choice<I, S>(
		target: impl Into<String>,
		codec: impl ValueCodec + 'static,
		allowed: I,
	) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::new(target, FilterKind::LookupChoice, Cardinality::Single, codec)
			.lookup(LookupSpec::choosable(allowed))
	}

	/// `today`, `yesterday`, `week`, `month` or `year`, relative to the local date
	pub fn date_range_preset(target: impl Into<String>) -> Self {
		let mut filter = Self::new(
			target,
			FilterKind::DateRangePreset,
			Cardinality::Single,
			TextCodec::default(),
		)
		.choices(preset::DatePreset::choices());
		filter.mode = Mode::DatePreset(Arc::new(preset::local_today));
		filter
	}

	/// Ordering by comma separated public field names, `-` for descending
	///
	/// `fields` maps each public name to the path it orders by.
	pub fn ordering<I, K, V>(fields: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let config = OrderingConfig::new(fields);
		let mut filter = Self::new(
			"",
			FilterKind::Ordering,
			Cardinality::Single,
			TextCodec::default(),
		)
		.choices(config.choices())
		.label("Ordering");
		filter.mode = Mode::Ordering(config);
		filter
	}
}
