//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs describe how domain records are laid out inside store
//! documents. They are private to the infrastructure layer.
//!
//! ### Todo document history
//! - Early clients wrote `textTitle` / `textDetail`; both are still read.
//! - Current writes use `title` / `detail`.

mod todo_document;

pub use todo_document::TodoDocumentDTO;
