//! Shared primitive types used across the escalation engine.

/// A directory-assigned department identifier.
pub type DepartmentId = String;

/// A human-readable department name. Configuration is keyed by these.
pub type DepartmentName = String;

/// A normalized, digit-only phone number.
pub type PhoneNumber = String;

/// The numbers produced by one escalation step, in the order they were found.
/// Never empty once it reaches the caller.
pub type EscalationGroup = Vec<PhoneNumber>;
