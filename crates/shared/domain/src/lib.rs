//! Domain layer - Core business entities and rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the account entity, field validation, authorization rules and the clock
//! abstraction used for audit metadata.

pub mod account;
pub mod clock;
pub mod constants;
pub mod deletion;
pub mod error;
pub mod gender;
pub mod password;
pub mod policy;
pub mod validation;

pub use account::{Account, AccountResponse, AccountSummary, NewAccount, ProfileChanges, Revocation};
pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::*;
pub use deletion::DeleteMode;
pub use error::{DomainError, DomainResult};
pub use gender::Gender;
pub use password::Password;
pub use policy::{authorize, Access, Operation};
pub use validation::Field;
