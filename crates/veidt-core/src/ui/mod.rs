//! Transient UI state
//!
//! Front-end independent controllers for the landing page:
//!
//! - `ToastQueue`: notifications that remove themselves after a delay
//! - `Modal`: open/closed dialog state with escape-key dismissal
//! - `ImageRotator`: auto-advancing index into a fixed image list
//!
//! Deferred work is always owned by a `ScopedTask`, so dropping a
//! controller cancels its pending timers. Controllers that schedule work
//! must be used inside a tokio runtime.

pub mod modal;
pub mod rotator;
pub mod timer;
pub mod toast;

pub use modal::Modal;
pub use rotator::{ImageRotator, LANDING_IMAGES};
pub use timer::ScopedTask;
pub use toast::{Toast, ToastQueue};
