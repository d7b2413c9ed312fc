//! Entity filter pipeline.
//!
//! Turns a provider snapshot into the ordered display set that list views
//! show and the marker engine renders:
//!
//! ```text
//! snapshot ──► mode restriction ──► type / open-now / text predicates
//!          ──► distance annotation ──► stable sort by distance ──► display set
//! ```
//!
//! The filter state is mirrored into the page query string (see
//! [`FilterSet::to_query_string`] and [`FilterSet::from_query_string`]).

mod criteria;
mod pipeline;
mod query_string;

pub use criteria::FilterSet;
pub use pipeline::compute_display_set;
