//! folio Page
//!
//! Interactive behavior of a single-page portfolio, driven over a headless
//! DOM and a virtual clock.
//!
//! # Example
//! ```rust,ignore
//! use folio_page::{PageConfig, PageController, Window};
//!
//! let document = folio_html::parse(html)?;
//! let mut page = PageController::new(document, Window::default(), PageConfig::default());
//! page.scroll_to(600.0);
//! page.advance(16);
//! ```

pub mod config;
mod error;
pub mod animation_lib;
mod window;
mod bindings;
pub mod nav;
pub mod scroll;
pub mod anchors;
pub mod reveal;
pub mod counter;
pub mod typewriter;
pub mod contact;
pub mod notification;
pub mod effects;
mod controller;

pub use config::{ConfigError, PageConfig};
pub use error::SetupError;
pub use animation_lib::{AnimationLibrary, AnimationLibraryOptions};
pub use window::Window;
pub use bindings::PageBindings;
pub use notification::NotificationKind;
pub use contact::{ContactSubmission, SubmitOutcome, Validation};
pub use controller::{Job, PageController};
