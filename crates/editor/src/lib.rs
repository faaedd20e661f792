//! Interaction state machine for the visual style editor.
//!
//! An [`EditorSession`] consumes pointer and keyboard signals from the host
//! document and owns everything session-scoped: the current phase, the hover
//! and selection targets, and the mutation ledger. It never blocks on the
//! bridges; outgoing bridge work is expressed as [`BridgeCommand`] values the
//! shell forwards to the runtime.

mod session;
mod target;

pub use session::{EditorError, EditorInput, EditorSession, Phase};
pub use target::TargetedElement;

/// Marker attribute on the editor's own control surface. Elements at or
/// under a node carrying it are never hover or selection targets.
pub const CHROME_ATTR: &str = "data-restyle-ui";

/// Byte ceiling for the markup captured into a selection snapshot.
pub const MARKUP_SNAPSHOT_CAP: usize = 2048;
