//! Background runtime for the persistence and suggestion bridges.
//!
//! The runtime thread drains [`BridgeCommand`]s and hands each one to its own
//! worker thread, so a slow save never delays a later load or suggestion
//! request. Every command produces exactly one event; there is no retry and
//! no cancellation, and the session never waits on an outcome.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use bus::{BridgeCommand, BridgeEvent};
use net::BridgeTransport;

pub fn start_bridge_runtime(
    cmd_rx: Receiver<BridgeCommand>,
    evt_tx: Sender<BridgeEvent>,
    transport: Arc<dyn BridgeTransport>,
) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let transport = transport.clone();
            let evt_tx = evt_tx.clone();
            thread::spawn(move || {
                let event = run_command(cmd, transport.as_ref());
                let _ = evt_tx.send(event);
            });
        }
        log::debug!(target: "runtime.bridge", "command channel closed, runtime exiting");
    });
}

fn run_command(cmd: BridgeCommand, transport: &dyn BridgeTransport) -> BridgeEvent {
    match cmd {
        BridgeCommand::LoadStyles { page_path } => {
            match transport.load_styles(&page_path) {
                Ok(entries) => {
                    log::info!(target: "runtime.bridge", "loaded {} entries for {page_path}", entries.len());
                    BridgeEvent::StylesLoaded { page_path, entries }
                }
                Err(e) => {
                    log::warn!(target: "runtime.bridge", "load failed for {page_path}: {e}");
                    BridgeEvent::LoadFailed {
                        page_path,
                        error: e.to_string(),
                    }
                }
            }
        }
        BridgeCommand::SaveStyles { page_path, entries } => {
            match transport.save_styles(&page_path, &entries) {
                Ok(()) => {
                    log::info!(target: "runtime.bridge", "saved {} entries for {page_path}", entries.len());
                    BridgeEvent::SaveFinished { page_path }
                }
                Err(e) => {
                    log::warn!(target: "runtime.bridge", "save failed for {page_path}: {e}");
                    BridgeEvent::SaveFailed {
                        page_path,
                        error: e.to_string(),
                    }
                }
            }
        }
        BridgeCommand::RequestSuggestions {
            context,
            instruction,
        } => match transport.request_suggestions(&context, &instruction) {
            Ok(suggestions) => {
                log::info!(target: "runtime.bridge", "{} suggestions for {}", suggestions.len(), context.selector);
                BridgeEvent::SuggestionsReady { suggestions }
            }
            Err(e) => {
                log::warn!(target: "runtime.bridge", "suggestion request failed: {e}");
                BridgeEvent::SuggestionsFailed {
                    error: e.to_string(),
                }
            }
        },
    }
}
