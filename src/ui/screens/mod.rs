pub(crate) mod allocations;
pub(crate) mod comparison;
pub(crate) mod setup;
pub(crate) mod timeline;
