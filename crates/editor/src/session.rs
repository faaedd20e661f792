use crate::{CHROME_ATTR, MARKUP_SNAPSHOT_CAP, TargetedElement};
use bus::{BridgeCommand, Suggestion, SuggestionContext};
use dom::{Id, Node, find_node_by_id, find_path_to, has_attr, serialize_markup};
use history::{HistoryError, MutationLog, PersistEntry};
use layout::{LayoutMap, Viewport, bounds_of, hit_test, layout_document};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Disabled,
    Idle,
    Hovering,
    Selected,
}

/// Signals fed into the session by the host shell.
#[derive(Clone, Copy, Debug)]
pub enum EditorInput {
    ToggleOn,
    ToggleOff,
    PointerMove { x: f32, y: f32 },
    PointerClick { x: f32, y: f32 },
    EscapeKey,
    Scroll { scroll_x: f32, scroll_y: f32 },
    Resize { width: f32, height: f32 },
}

#[derive(Debug)]
pub enum EditorError {
    /// An edit operation was requested with nothing selected.
    NoSelection,
    /// The suggestion carries no usable style changes.
    NotApplicable,
    History(HistoryError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::NoSelection => write!(f, "no element is selected"),
            EditorError::NotApplicable => write!(f, "suggestion has no applicable style changes"),
            EditorError::History(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<HistoryError> for EditorError {
    fn from(e: HistoryError) -> Self {
        EditorError::History(e)
    }
}

/// One editing session over one loaded page view.
///
/// Hover and selection are transient; the mutation ledger and any inline
/// styles already written to the document outlive disable/enable cycles and
/// are dropped only with the session itself.
pub struct EditorSession {
    phase: Phase,
    hover: Option<Id>,
    selected: Option<Id>,
    target: Option<TargetedElement>,
    log: MutationLog,
    suggestion_pending: bool,
    viewport: Viewport,
    layout: LayoutMap,
}

impl EditorSession {
    pub fn new(dom: &Node, viewport: Viewport) -> Self {
        Self {
            phase: Phase::Disabled,
            hover: None,
            selected: None,
            target: None,
            log: MutationLog::new(),
            suggestion_pending: false,
            viewport,
            layout: layout_document(dom, viewport.width),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hover(&self) -> Option<Id> {
        self.hover
    }

    pub fn target(&self) -> Option<&TargetedElement> {
        self.target.as_ref()
    }

    pub fn log(&self) -> &MutationLog {
        &self.log
    }

    pub fn suggestion_pending(&self) -> bool {
        self.suggestion_pending
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Recompute layout after the document changed structurally.
    pub fn relayout(&mut self, dom: &Node) {
        self.layout = layout_document(dom, self.viewport.width);
        self.refresh_selected_bounds();
    }

    /// Feed one input signal. Returns `true` when the event was consumed and
    /// the host must suppress the default action (link navigation, button
    /// activation). Only clicks and Escape are ever consumed, and only while
    /// the editor is enabled and the event is not over its own chrome.
    pub fn handle_input(&mut self, dom: &Node, input: EditorInput) -> bool {
        match input {
            EditorInput::ToggleOn => {
                if self.phase == Phase::Disabled {
                    self.phase = Phase::Idle;
                    log::debug!(target: "editor.session", "enabled");
                }
                false
            }
            EditorInput::ToggleOff => {
                // Hover and selection are transient; the ledger and applied
                // inline styles stay in effect.
                self.phase = Phase::Disabled;
                self.hover = None;
                self.selected = None;
                self.target = None;
                log::debug!(target: "editor.session", "disabled");
                false
            }
            EditorInput::Scroll { scroll_x, scroll_y } => {
                self.viewport.scroll_x = scroll_x;
                self.viewport.scroll_y = scroll_y;
                self.refresh_selected_bounds();
                false
            }
            EditorInput::Resize { width, height } => {
                self.viewport.width = width;
                self.viewport.height = height;
                self.layout = layout_document(dom, width);
                self.refresh_selected_bounds();
                false
            }
            EditorInput::PointerMove { x, y } => {
                if self.phase == Phase::Disabled {
                    return false;
                }
                let hit = hit_test(dom, &self.layout, &self.viewport, x, y)
                    .filter(|&id| !self.is_chrome(dom, id));
                match hit {
                    Some(id) => {
                        self.hover = Some(id);
                        if self.phase == Phase::Idle {
                            self.phase = Phase::Hovering;
                        }
                    }
                    None => {
                        self.hover = None;
                        if self.phase == Phase::Hovering {
                            self.phase = Phase::Idle;
                        }
                    }
                }
                false
            }
            EditorInput::PointerClick { x, y } => {
                if self.phase == Phase::Disabled {
                    return false;
                }
                if let Some(id) = hit_test(dom, &self.layout, &self.viewport, x, y) {
                    if self.is_chrome(dom, id) {
                        // let the editor's own controls receive the click
                        return false;
                    }
                    self.select(dom, id);
                }
                // consumed even when the click lands on nothing: an enabled
                // editor intercepts activation wholesale
                true
            }
            EditorInput::EscapeKey => {
                match self.phase {
                    Phase::Disabled => return false,
                    Phase::Selected => {
                        self.selected = None;
                        self.target = None;
                        // hover is stale until the next pointer move
                        self.hover = None;
                        self.phase = Phase::Idle;
                        log::debug!(target: "editor.session", "deselected");
                    }
                    Phase::Idle | Phase::Hovering => {
                        self.phase = Phase::Disabled;
                        self.hover = None;
                        log::debug!(target: "editor.session", "disabled via escape");
                    }
                }
                true
            }
        }
    }

    fn is_chrome(&self, dom: &Node, id: Id) -> bool {
        find_path_to(dom, id)
            .is_some_and(|path| path.iter().any(|node| has_attr(node, CHROME_ATTR)))
    }

    fn select(&mut self, dom: &Node, id: Id) {
        let Some(node) = find_node_by_id(dom, id) else {
            return;
        };
        let Some(selector) = selector::resolve(dom, id) else {
            log::warn!(target: "editor.session", "clicked node has no selector, ignoring");
            return;
        };
        let target = TargetedElement {
            selector,
            tag_name: node.tag_name().unwrap_or_default().to_string(),
            bounding_box: bounds_of(&self.layout, id, &self.viewport).unwrap_or_default(),
            markup_snapshot: serialize_markup(node, MARKUP_SNAPSHOT_CAP),
            style_snapshot: style::snapshot(node),
        };
        log::info!(target: "editor.session", "selected {}", target.selector);
        // re-selection replaces the snapshot and nothing else
        self.selected = Some(id);
        self.target = Some(target);
        self.phase = Phase::Selected;
    }

    fn refresh_selected_bounds(&mut self) {
        if let Some(id) = self.selected
            && let Some(target) = self.target.as_mut()
        {
            target.bounding_box = bounds_of(&self.layout, id, &self.viewport).unwrap_or_default();
        }
    }

    /// Apply a style-change map to the selected element through the ledger.
    pub fn apply_changes(
        &mut self,
        dom: &mut Node,
        changes: &BTreeMap<String, String>,
    ) -> Result<usize, EditorError> {
        let selector = self
            .target
            .as_ref()
            .map(|t| t.selector.clone())
            .ok_or(EditorError::NoSelection)?;
        Ok(self.log.apply(dom, &selector, changes)?)
    }

    /// Apply a bridge suggestion. Same code path as an operator edit.
    pub fn apply_suggestion(
        &mut self,
        dom: &mut Node,
        suggestion: &Suggestion,
    ) -> Result<usize, EditorError> {
        if !suggestion.is_applicable() {
            return Err(EditorError::NotApplicable);
        }
        match &suggestion.style_changes {
            Some(changes) => self.apply_changes(dom, changes),
            None => Err(EditorError::NotApplicable),
        }
    }

    pub fn undo(&mut self, dom: &mut Node) -> Result<(), EditorError> {
        Ok(self.log.revert_last(dom)?)
    }

    pub fn revert_to(&mut self, dom: &mut Node, index: usize) -> Result<usize, EditorError> {
        Ok(self.log.revert_to_index(dom, index)?)
    }

    pub fn export_stylesheet(&self, unix_ts: u64) -> String {
        self.log.export_stylesheet(unix_ts)
    }

    /// Build the save command for the persistence bridge.
    pub fn save_command(&self, page_path: &str) -> BridgeCommand {
        BridgeCommand::SaveStyles {
            page_path: page_path.to_string(),
            entries: self.log.serialize(),
        }
    }

    /// Direct-apply persisted entries, bypassing the ledger. Used on load.
    pub fn load_persisted(&mut self, dom: &mut Node, entries: &[PersistEntry]) -> usize {
        let applied = history::apply_persisted(dom, entries);
        self.relayout(dom);
        applied
    }

    /// Build a suggestion request for the current selection and mark the
    /// round-trip as pending. The pending flag gates affordances only; every
    /// transition above works unchanged while a request is in flight.
    pub fn request_suggestions(&mut self, instruction: &str) -> Result<BridgeCommand, EditorError> {
        let target = self.target.as_ref().ok_or(EditorError::NoSelection)?;
        self.suggestion_pending = true;
        let b = target.bounding_box;
        Ok(BridgeCommand::RequestSuggestions {
            context: SuggestionContext {
                selector: target.selector.clone(),
                tag_name: target.tag_name.clone(),
                bounding_box: (b.x, b.y, b.width, b.height),
                style_snapshot: target.style_snapshot.clone(),
                markup_snapshot: target.markup_snapshot.clone(),
            },
            instruction: instruction.to_string(),
        })
    }

    /// Called when the suggestion round-trip settles, either way.
    pub fn suggestions_settled(&mut self) {
        self.suggestion_pending = false;
    }
}
