//! Command/event channel bundle between the editing session and the bridge
//! runtime. Commands flow to the runtime thread; events flow back and are
//! drained by the shell between interactions. Both bridges are
//! fire-and-initiate: a pending call never blocks the session, and a later
//! command is not queued behind an earlier outcome.

use history::PersistEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::mpsc::{Receiver, Sender};

/// Selection context shipped to the suggestion backend: everything it needs
/// to reason about one element, nothing it could use to mutate the page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuggestionContext {
    pub selector: String,
    pub tag_name: String,
    pub bounding_box: (f32, f32, f32, f32),
    pub style_snapshot: BTreeMap<String, String>,
    pub markup_snapshot: String,
}

/// A candidate change from the suggestion backend. `style_changes`, when
/// present, is a valid input to `MutationLog::apply`; the backend itself
/// never touches the document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    #[serde(default)]
    pub style_changes: Option<BTreeMap<String, String>>,
}

impl Suggestion {
    /// A suggestion without a usable change map can be shown but not applied.
    pub fn is_applicable(&self) -> bool {
        self.style_changes.as_ref().is_some_and(|m| !m.is_empty())
    }
}

#[derive(Debug)]
pub enum BridgeCommand {
    LoadStyles {
        page_path: String,
    },
    SaveStyles {
        page_path: String,
        entries: Vec<PersistEntry>,
    },
    RequestSuggestions {
        context: SuggestionContext,
        instruction: String,
    },
}

#[derive(Debug)]
pub enum BridgeEvent {
    StylesLoaded {
        page_path: String,
        entries: Vec<PersistEntry>,
    },
    LoadFailed {
        page_path: String,
        error: String,
    },
    SaveFinished {
        page_path: String,
    },
    SaveFailed {
        page_path: String,
        error: String,
    },
    SuggestionsReady {
        suggestions: Vec<Suggestion>,
    },
    SuggestionsFailed {
        error: String,
    },
}

pub struct Bus {
    pub cmd_tx: Sender<BridgeCommand>,
    pub evt_rx: Receiver<BridgeEvent>,
    pub evt_tx: Sender<BridgeEvent>, // shareable for runtimes
}

impl Bus {
    /// Build both channel pairs, returning the bus and the runtime's command
    /// receiver.
    pub fn new() -> (Self, Receiver<BridgeCommand>) {
        let (cmd_tx, cmd_rx) = std::sync::mpsc::channel();
        let (evt_tx, evt_rx) = std::sync::mpsc::channel();
        (
            Self {
                cmd_tx,
                evt_rx,
                evt_tx,
            },
            cmd_rx,
        )
    }
}
