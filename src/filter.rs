//! Record filter seam for host pipelines.
//!
//! A pipeline stage hands each record to a [`RecordFilter`] and forwards
//! whatever comes back. [`FilterChain`] runs several filters in order.

use crate::typecast::Typecaster;
use crate::value::Value;
use std::sync::Arc;

/// Name under which the typecaster registers itself.
pub const AUTO_TYPECAST: &str = "auto_typecast";

/// Trait for record filters
pub trait RecordFilter: Send + Sync {
    /// Filter one record
    fn filter(&self, record: Value) -> Value;

    /// Name used in logs and filter listings
    fn name(&self) -> &str;
}

impl RecordFilter for Typecaster {
    fn filter(&self, record: Value) -> Value {
        Typecaster::filter(self, record)
    }

    fn name(&self) -> &str {
        AUTO_TYPECAST
    }
}

/// Closure-based filter
pub struct FnFilter<F> {
    name: String,
    func: F,
}

impl<F> FnFilter<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> RecordFilter for FnFilter<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn filter(&self, record: Value) -> Value {
        (self.func)(record)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered chain of record filters
#[derive(Default, Clone)]
pub struct FilterChain {
    filters: Vec<Arc<dyn RecordFilter>>,
}

impl FilterChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter
    pub fn add<T: RecordFilter + 'static>(mut self, filter: T) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Append an already shared filter
    pub fn add_shared(mut self, filter: Arc<dyn RecordFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Run every filter in order
    pub fn apply(&self, record: Value) -> Value {
        self.filters
            .iter()
            .fold(record, |record, filter| filter.filter(record))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Names of the filters in the chain
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }
}
