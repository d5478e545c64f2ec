//! Relative date range presets

use super::{Cleaned, Filter};
use crate::choices::Choices;
use crate::error::{ChoiceValidationError, FieldError};
use crate::lookup::lookups;
use crate::params::QueryParams;
use crate::query::{Predicate, Queryable};
use crate::value::FilterValue;
use chrono::{Datelike, Days, Local, NaiveDate};
use std::sync::Arc;

/// Source of "today" for preset ranges
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

pub fn local_today() -> NaiveDate {
	Local::now().date_naive()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
	Today,
	Yesterday,
	/// The past seven days including today
	Week,
	/// The current calendar month
	Month,
	/// The current calendar year
	Year,
}

impl DatePreset {
	pub const ALL: [DatePreset; 5] = [
		Self::Today,
		Self::Yesterday,
		Self::Week,
		Self::Month,
		Self::Year,
	];

	pub fn key(self) -> &'static str {
		match self {
			Self::Today => "today",
			Self::Yesterday => "yesterday",
			Self::Week => "week",
			Self::Month => "month",
			Self::Year => "year",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Today => "Today",
			Self::Yesterday => "Yesterday",
			Self::Week => "Past 7 days",
			Self::Month => "This month",
			Self::Year => "This year",
		}
	}

	pub fn parse(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|preset| preset.key() == key)
	}

	pub fn choices() -> Choices {
		Self::ALL
			.into_iter()
			.map(|preset| crate::choices::Choice::new(preset.key(), preset.label()))
			.collect()
	}

	/// Half-open `[start, end)` range relative to `today`
	pub fn bounds(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
		let tomorrow = today.succ_opt()?;
		match self {
			Self::Today => Some((today, tomorrow)),
			Self::Yesterday => Some((today.pred_opt()?, today)),
			Self::Week => Some((today.checked_sub_days(Days::new(7))?, tomorrow)),
			Self::Month => {
				let start = today.with_day(1)?;
				let end = if today.month() == 12 {
					NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
				} else {
					NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
				};
				Some((start, end))
			}
			Self::Year => Some((
				NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
				NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?,
			)),
		}
	}
}

impl<Q> Filter<Q> {
	/// Use `clock` instead of the local date
	pub fn clock<F>(mut self, clock: F) -> Self
	where
		F: Fn() -> NaiveDate + Send + Sync + 'static,
	{
		if matches!(self.mode, super::Mode::DatePreset(_)) {
			self.mode = super::Mode::DatePreset(Arc::new(clock));
		}
		self
	}
}

impl<Q: Queryable> Filter<Q> {
	pub(crate) fn clean_preset(
		&self,
		name: &str,
		params: &QueryParams,
		clock: &Clock,
	) -> Result<Option<Cleaned>, FieldError> {
		let Some(raw) = params.get(name).map(str::trim).filter(|raw| !raw.is_empty()) else {
			return Ok(None);
		};
		let preset = DatePreset::parse(raw).ok_or_else(|| ChoiceValidationError::new(raw))?;

		if self.resolver.is_some() {
			return Ok(Some(Cleaned::Resolver(FilterValue::String(
				preset.key().to_string(),
			))));
		}

		let Some((start, end)) = preset.bounds(clock()) else {
			tracing::warn!(filter = name, preset = preset.key(), "preset range out of calendar bounds");
			return Ok(None);
		};
		Ok(Some(Cleaned::Predicate(Predicate::and(vec![
			Predicate::compare(self.target.clone(), lookups::GTE, start),
			Predicate::compare(self.target.clone(), lookups::LT, end),
		]))))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn d(y: i32, m: u32, day: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, day).unwrap()
	}

	#[rstest]
	#[case(DatePreset::Today, d(2024, 3, 15), d(2024, 3, 16))]
	#[case(DatePreset::Yesterday, d(2024, 3, 14), d(2024, 3, 15))]
	#[case(DatePreset::Week, d(2024, 3, 8), d(2024, 3, 16))]
	#[case(DatePreset::Month, d(2024, 3, 1), d(2024, 4, 1))]
	#[case(DatePreset::Year, d(2024, 1, 1), d(2025, 1, 1))]
	fn test_bounds(#[case] preset: DatePreset, #[case] start: NaiveDate, #[case] end: NaiveDate) {
		assert_eq!(preset.bounds(d(2024, 3, 15)), Some((start, end)));
	}

	#[rstest]
	fn test_december_rolls_over() {
		assert_eq!(
			DatePreset::Month.bounds(d(2023, 12, 31)),
			Some((d(2023, 12, 1), d(2024, 1, 1)))
		);
	}

	#[rstest]
	fn test_parse_roundtrips_keys() {
		for preset in DatePreset::ALL {
			assert_eq!(DatePreset::parse(preset.key()), Some(preset));
		}
		assert_eq!(DatePreset::parse("decade"), None);
	}
}
