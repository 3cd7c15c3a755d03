//! Custom request extractors.

mod credentials;
mod validated_json;

pub use credentials::AuthHeaders;
pub use validated_json::ValidatedJson;
