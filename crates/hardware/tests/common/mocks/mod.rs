//! Mock implementations of core traits.
