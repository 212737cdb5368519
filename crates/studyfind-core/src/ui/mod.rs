//! Boundaries between the screen controllers and the surrounding shell.
//!
//! The controllers only ever emit directives and requests through these
//! traits; rendering, dialogs and navigation history belong to the shell.

mod back;
mod confirmation;
mod navigation;
mod notice;

pub use back::{BackGestureOutcome, BackNavigation, InterceptId};
pub use confirmation::{ConfirmationDialog, ConfirmationOutcome, ConfirmationRequest};
pub use navigation::{NavigationDirective, Navigator};
pub use notice::{Notice, NoticeSeverity, Notifier};
