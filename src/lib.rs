//! Transtip Library
//!
//! Translate the selected text, or the sentence around the cursor with the
//! word at point blanked out, through an external translation CLI and show
//! the result in a popup.

pub mod config;
pub mod error;
pub mod host;
pub mod invoker;
pub mod mode;
pub mod popup;
pub mod session;
pub mod text;
pub mod translate;

pub use config::{CommandVariant, Config, ToolCommand, ToolConfig};
pub use error::{TransError, TransResult};
pub use host::{Editor, Popup, Span, TextBuffer};
pub use invoker::{CancelHandle, CommandInvoker, Invocation, ProcessInvoker, ToolExit};
pub use mode::{Action, TransMode, Trigger};
pub use session::Session;
pub use translate::{Dispatch, SkipReason, TranslationHandle};
