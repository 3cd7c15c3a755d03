//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Seeded administrator
// =============================================================================

/// Login of the administrator account created by the initial migration
pub const SEED_ADMIN_LOGIN: &str = "Admin";

/// Password of the seeded administrator account
pub const SEED_ADMIN_PASSWORD: &str = "Admin";

/// Display name of the seeded administrator account
pub const SEED_ADMIN_NAME: &str = "Admin";

// =============================================================================
// Deletion
// =============================================================================

/// Soft delete: the record is kept and marked as revoked
pub const DELETE_MODE_SOFT: &str = "soft";

/// Hard delete: the record is erased
pub const DELETE_MODE_HARD: &str = "hard";

// =============================================================================
// Authorization
// =============================================================================

/// Denial reason for admin-only operations
pub const DENY_ADMIN_REQUIRED: &str = "administrator rights required";

/// Denial reason when a non-admin targets another account
pub const DENY_NOT_OWNER: &str = "accounts may only act on themselves";

/// Denial reason when a non-admin account has been revoked
pub const DENY_REVOKED: &str = "record deleted";

// =============================================================================
// Transport
// =============================================================================

/// Request header carrying the acting login
pub const HEADER_LOGIN: &str = "Login";

/// Request header carrying the acting password
pub const HEADER_PASSWORD: &str = "Password";
