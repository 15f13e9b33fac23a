//! Search API: request conditions and the host query integration points.

mod search_conditions;
pub use search_conditions::{ADDRESS_META_KEY, build_search_plan};

pub mod host_query;
