//! Storage-domain contracts used for host-side configuration.

pub mod prefs;
