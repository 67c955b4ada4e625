// Library crate: the editor core. Hosts supply rendering, widgets and file
// dialogs, and drive everything through `app::EditorSession`.

pub mod app;
pub mod error;
pub mod fixtures;
pub mod geometry;
pub mod harness;
pub mod io;
pub mod state;
pub mod viewport;

pub use app::{EditorSession, Effects};
pub use error::{EditorError, EditorResult, Severity};
