//! # Reinhardt Filterset Core
//!
//! Declarative query-parameter filtering in the style of django-filter.
//!
//! A [`FilterSet`] holds named [`Filter`]s. Binding it to raw [`QueryParams`] decodes,
//! validates and applies each filter to a [`Queryable`] in declaration order, producing
//! the narrowed queryable plus a map of per-filter errors.
//!
//! ## Features
//!
//! - **Typed decoding**: booleans, numbers, dates, times, UUIDs and CSV lists through
//!   [`ValueCodec`]s, with lenient and strict ISO date parsing
//! - **Choices**: static lists or live [`ChoiceSource`]s, optional null choice
//! - **Multiple and range filters**: OR/AND composition, no-op detection, paired bounds
//! - **Auto-derivation**: filters generated from a [`Schema`]
//! - **Queryables**: [`RecordingQuery`] for tests and [`MemoryQuery`] over JSON rows;
//!   SQL lives in `reinhardt-filterset-sql`
//!
//! ## Example
//!
//! ```
//! use reinhardt_filterset_core::prelude::*;
//!
//! let filterset = FilterSet::builder()
//!     .filter("status", Filter::multiple_choice("status", [("d", "Draft"), ("p", "Published")]))
//!     .filter("price", Filter::numeric_range("price"))
//!     .build()
//!     .unwrap();
//!
//! let params = QueryParams::from_query_string("status=d&status=p&price_min=5").unwrap();
//! let bound = filterset.bind(params, RecordingQuery::new());
//!
//! assert!(bound.is_valid());
//! assert_eq!(bound.queryable().filters().len(), 2);
//! ```

pub mod choices;
pub mod codec;
pub mod error;
pub mod filter;
pub mod filterset;
pub mod lookup;
pub mod metadata;
pub mod params;
pub mod query;
pub mod schema;
pub mod settings;
pub mod value;

pub use choices::{Choice, ChoiceSet, ChoiceSource, Choices};
pub use codec::{SharedCodec, ValueCodec, codec_for_lookup};
pub use error::{
	Bound, ChoiceValidationError, ConfigurationError, DecodeError, FieldError, FieldErrors,
	FilterSetResult, RangeBoundError,
};
pub use filter::{Cardinality, Filter, FilterKind};
pub use filterset::{BoundFilterSet, Fields, FilterSet, FilterSetBuilder};
pub use lookup::{LookupSpec, lookups};
pub use metadata::FilterMeta;
pub use params::QueryParams;
pub use query::{
	Comparison, MemoryQuery, OrderBy, Predicate, QueryCall, Queryable, RecordingQuery,
};
pub use schema::{FieldType, Schema, SchemaField};
pub use settings::{FilterSettings, SettingsError};
pub use value::FilterValue;

/// Common imports
pub mod prelude {
	pub use crate::{
		BoundFilterSet, Choices, FieldError, FieldType, Fields, Filter, FilterSet, FilterSettings,
		FilterValue, LookupSpec, MemoryQuery, OrderBy, Predicate, QueryParams, Queryable,
		RecordingQuery, Schema, SchemaField,
	};
}
