use crate::models::{FilterCriteria, Record, TypeFilter};

impl TypeFilter {
    /// Exact, case-sensitive type match; `Any` accepts everything
    #[inline]
    pub fn matches(&self, locker_type: &str) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Exactly(expected) => expected == locker_type,
        }
    }
}

/// Check if a locker satisfies every active filter
#[inline]
pub fn passes_filters(record: &Record, filters: &FilterCriteria) -> bool {
    if filters.require_accessible && !record.accessible {
        return false;
    }

    if filters.require_parking && !record.parking {
        return false;
    }

    filters.type_filter.matches(&record.locker_type)
}
