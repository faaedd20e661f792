//! Headless shell for the style editor.
//!
//! Loads a document, builds an editing session, and replays interaction
//! commands from stdin, one per line:
//!
//! ```text
//! on | off | move X Y | click X Y | esc | set PROP VALUE | undo |
//! revert N | save | export | suggest TEXT... | quit
//! ```
//!
//! When `RESTYLER_BACKEND` names a base URL the bridge runtime is started
//! against it and persisted styles are loaded on startup; without it the
//! session runs standalone and `save`/`suggest` report that no backend is
//! configured.

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bus::{BridgeCommand, BridgeEvent, Bus};
use dom::{Node, collect_style_texts, parse_document};
use editor::{EditorInput, EditorSession, Phase};
use layout::Viewport;
use net::{BridgeClient, BridgeConfig};
use style::{attach_styles, parse_stylesheet};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const SAMPLE_PAGE: &str = include_str!("sample.html");

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (mut dom, page_path) = match env::args().nth(1) {
        Some(path) => {
            let html = fs::read_to_string(&path)?;
            (parse_document(&html), path)
        }
        None => (parse_document(SAMPLE_PAGE), "/sample".to_string()),
    };

    let mut css = String::new();
    collect_style_texts(&dom, &mut css);
    attach_styles(&mut dom, &parse_stylesheet(&css));

    let viewport = Viewport {
        scroll_x: 0.0,
        scroll_y: 0.0,
        width: 1024.0,
        height: 768.0,
    };
    let mut session = EditorSession::new(&dom, viewport);

    let bridge = env::var("RESTYLER_BACKEND").ok().map(|base| {
        let (bus, cmd_rx) = Bus::new();
        let client = BridgeClient::new(BridgeConfig::with_base_url(base));
        runtime_bridge::start_bridge_runtime(cmd_rx, bus.evt_tx.clone(), Arc::new(client));
        let _ = bus.cmd_tx.send(BridgeCommand::LoadStyles {
            page_path: page_path.clone(),
        });
        bus
    });

    let stdin = io::stdin();
    let mut out = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if let Some(bus) = &bridge {
            drain_events(bus, &mut session, &mut dom);
        }
        if !run_command(line.trim(), &mut session, &mut dom, bridge.as_ref(), &page_path)? {
            break;
        }
        out.flush()?;
    }
    Ok(())
}

/// Returns `false` when the shell should exit.
fn run_command(
    line: &str,
    session: &mut EditorSession,
    dom: &mut Node,
    bridge: Option<&Bus>,
    page_path: &str,
) -> Result<bool, Box<dyn Error>> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => {}
        Some("quit") => return Ok(false),
        Some("on") => {
            session.handle_input(dom, EditorInput::ToggleOn);
            print_phase(session);
        }
        Some("off") => {
            session.handle_input(dom, EditorInput::ToggleOff);
            print_phase(session);
        }
        Some("esc") => {
            session.handle_input(dom, EditorInput::EscapeKey);
            print_phase(session);
        }
        Some("move") => {
            if let (Some(x), Some(y)) = (parse_f32(parts.next()), parse_f32(parts.next())) {
                session.handle_input(dom, EditorInput::PointerMove { x, y });
                print_phase(session);
            } else {
                println!("usage: move X Y");
            }
        }
        Some("click") => {
            if let (Some(x), Some(y)) = (parse_f32(parts.next()), parse_f32(parts.next())) {
                let consumed = session.handle_input(dom, EditorInput::PointerClick { x, y });
                match session.target() {
                    Some(t) if consumed => {
                        println!("selected {} <{}> at {:?}", t.selector, t.tag_name, t.bounding_box)
                    }
                    _ => print_phase(session),
                }
            } else {
                println!("usage: click X Y");
            }
        }
        Some("set") => {
            let (prop, value) = (parts.next(), parts.collect::<Vec<_>>().join(" "));
            match prop {
                Some(prop) if !value.is_empty() => {
                    let mut changes = std::collections::BTreeMap::new();
                    changes.insert(prop.to_string(), value);
                    match session.apply_changes(dom, &changes) {
                        Ok(n) => println!("applied {n} properties ({} records)", session.log().len()),
                        Err(e) => println!("error: {e}"),
                    }
                }
                _ => println!("usage: set PROP VALUE"),
            }
        }
        Some("undo") => match session.undo(dom) {
            Ok(()) => println!("reverted ({} records left)", session.log().len()),
            Err(e) => println!("error: {e}"),
        },
        Some("revert") => match parts.next().and_then(|s| s.parse::<usize>().ok()) {
            Some(index) => match session.revert_to(dom, index) {
                Ok(n) => println!("reverted {n} records ({} left)", session.log().len()),
                Err(e) => println!("error: {e}"),
            },
            None => println!("usage: revert N"),
        },
        Some("export") => {
            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            println!("{}", session.export_stylesheet(ts));
        }
        Some("save") => match bridge {
            Some(bus) => {
                bus.cmd_tx.send(session.save_command(page_path))?;
                println!("save requested ({} entries)", session.log().len());
            }
            None => println!("no backend configured (set RESTYLER_BACKEND)"),
        },
        Some("suggest") => {
            let instruction = parts.collect::<Vec<_>>().join(" ");
            match bridge {
                Some(bus) => match session.request_suggestions(&instruction) {
                    Ok(cmd) => {
                        bus.cmd_tx.send(cmd)?;
                        println!("suggestions requested");
                    }
                    Err(e) => println!("error: {e}"),
                },
                None => println!("no backend configured (set RESTYLER_BACKEND)"),
            }
        }
        Some(other) => println!("unknown command: {other}"),
    }
    Ok(true)
}

fn drain_events(bus: &Bus, session: &mut EditorSession, dom: &mut Node) {
    while let Ok(event) = bus.evt_rx.try_recv() {
        match event {
            BridgeEvent::StylesLoaded { page_path, entries } => {
                let applied = session.load_persisted(dom, &entries);
                println!("loaded {applied}/{} persisted entries for {page_path}", entries.len());
            }
            BridgeEvent::LoadFailed { page_path, error } => {
                println!("load failed for {page_path}: {error}");
            }
            BridgeEvent::SaveFinished { page_path } => println!("saved styles for {page_path}"),
            BridgeEvent::SaveFailed { page_path, error } => {
                println!("save failed for {page_path}: {error}");
            }
            BridgeEvent::SuggestionsReady { suggestions } => {
                session.suggestions_settled();
                for s in &suggestions {
                    let tag = if s.is_applicable() { "" } else { " (not applicable)" };
                    println!("suggestion{tag}: {}", s.text);
                }
            }
            BridgeEvent::SuggestionsFailed { error } => {
                session.suggestions_settled();
                println!("suggestions failed: {error}");
            }
        }
    }
}

fn print_phase(session: &EditorSession) {
    let phase = match session.phase() {
        Phase::Disabled => "disabled",
        Phase::Idle => "idle",
        Phase::Hovering => "hovering",
        Phase::Selected => "selected",
    };
    println!("[{phase}]");
}

fn parse_f32(s: Option<&str>) -> Option<f32> {
    s.and_then(|s| s.parse().ok())
}
