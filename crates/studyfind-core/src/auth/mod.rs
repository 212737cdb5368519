//! Authentication domain module.
//!
//! # Module Structure
//!
//! - `model`: `UserId` and `SessionIdentity`
//! - `provider`: the `AuthProvider` subscription boundary
//!
//! # Usage
//!
//! ```ignore
//! use studyfind_core::auth::{AuthProvider, SessionIdentity, UserId};
//! ```

mod model;
mod provider;

pub use model::{SessionIdentity, UserId};
pub use provider::{AuthListener, AuthProvider, SubscriptionId};
