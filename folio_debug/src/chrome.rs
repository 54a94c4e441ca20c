// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events kept by a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Scroll position and hero frame are exported as counter tracks (`"ph": "C"`)
//! so they plot as lines; everything else is an instant event.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::pretty::{anchor_name, cause_name};
use crate::recorder::RecordedEvent;

// One thread row per concern in the viewer.
const TID_SCROLL: u32 = 0;
const TID_NAV: u32 = 1;
const TID_REVEAL: u32 = 2;
const TID_HERO: u32 = 3;
const TID_INPUT: u32 = 4;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Timestamps are host microseconds, which is the unit the format expects.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::with_capacity(events.len());

    for recorded in events {
        let ts = recorded.now().micros();
        match recorded {
            RecordedEvent::ScrollFrame(e) => {
                out.push(json!({
                    "ph": "C",
                    "name": "scrollY",
                    "cat": "Scroll",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_SCROLL,
                    "args": {
                        "y": e.scroll_y,
                    }
                }));
                out.push(json!({
                    "ph": "i",
                    "name": "ScrollFrame",
                    "cat": "Scroll",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_SCROLL,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "coalesced": e.coalesced,
                    }
                }));
            }
            RecordedEvent::ActiveSection(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "ActiveSection",
                    "cat": "Nav",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_NAV,
                    "s": "p",
                    "args": {
                        "from": e.from.map(|s| s.0),
                        "to": e.to.map(|s| s.0),
                        "links": e.links,
                    }
                }));
            }
            RecordedEvent::NavVisibility(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "NavVisibility",
                    "cat": "Nav",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_NAV,
                    "s": "t",
                    "args": {
                        "hidden": e.hidden,
                        "scroll_y": e.scroll_y,
                    }
                }));
            }
            RecordedEvent::Header(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Header",
                    "cat": "Nav",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_NAV,
                    "s": "t",
                    "args": {
                        "scrolled": e.scrolled,
                        "back_to_top": e.back_to_top,
                    }
                }));
            }
            RecordedEvent::Reveal(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Reveal",
                    "cat": "Reveal",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_REVEAL,
                    "s": "t",
                    "args": {
                        "id": e.id.0,
                        "delay_us": e.delay.micros(),
                    }
                }));
            }
            RecordedEvent::FrameAdvance(e) => {
                out.push(json!({
                    "ph": "C",
                    "name": "heroFrame",
                    "cat": "Hero",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_HERO,
                    "args": {
                        "frame": e.to,
                    }
                }));
                if e.steps > 1 {
                    out.push(json!({
                        "ph": "i",
                        "name": "LateTick",
                        "cat": "Hero",
                        "ts": ts,
                        "pid": 0,
                        "tid": TID_HERO,
                        "s": "t",
                        "args": {
                            "from": e.from,
                            "steps": e.steps,
                        }
                    }));
                }
            }
            RecordedEvent::Menu(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Menu",
                    "cat": "Input",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_INPUT,
                    "s": "t",
                    "args": {
                        "open": e.open,
                        "cause": cause_name(e.cause),
                    }
                }));
            }
            RecordedEvent::Accordion(e) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Accordion",
                    "cat": "Input",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_INPUT,
                    "s": "t",
                    "args": {
                        "id": e.id.0,
                        "open": e.open,
                    }
                }));
            }
            RecordedEvent::Anchor(a) => {
                out.push(json!({
                    "ph": "i",
                    "name": "Anchor",
                    "cat": "Input",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_INPUT,
                    "s": "t",
                    "args": {
                        "kind": anchor_name(a.kind),
                        "href": a.href,
                        "top": a.top,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use folio_core::page::SectionId;
    use folio_core::time::HostTime;
    use folio_core::trace::{
        ActiveSectionEvent, AnchorEvent, AnchorKind, FrameAdvanceEvent, ScrollFrameEvent,
        TraceSink,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_scroll_frame(&ScrollFrameEvent {
            frame_index: 0,
            now: HostTime(16_000),
            scroll_y: 320.0,
            coalesced: 1,
        });
        rec.on_active_section(&ActiveSectionEvent {
            now: HostTime(16_000),
            from: None,
            to: Some(SectionId(1)),
            links: 2,
        });
        rec.on_anchor(&AnchorEvent {
            now: HostTime(40_000),
            kind: AnchorKind::Fragment,
            href: "#work",
            top: Some(540.0),
        });

        let mut out = Vec::new();
        export(rec.events(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 4, "scroll frame exports a counter and an instant");

        assert_eq!(parsed[0]["ph"], "C");
        assert_eq!(parsed[0]["args"]["y"], 320.0);
        assert_eq!(parsed[1]["name"], "ScrollFrame");
        assert_eq!(parsed[1]["ts"], 16_000);

        assert_eq!(parsed[2]["name"], "ActiveSection");
        assert!(parsed[2]["args"]["from"].is_null(), "no previous section");
        assert_eq!(parsed[2]["args"]["to"], 1);

        assert_eq!(parsed[3]["args"]["kind"], "fragment");
        assert_eq!(parsed[3]["args"]["href"], "#work");
    }

    #[test]
    fn late_hero_tick_adds_a_marker() {
        let mut rec = RecorderSink::new();
        rec.on_frame_advance(&FrameAdvanceEvent {
            now: HostTime(750_000),
            from: 0,
            to: 1,
            steps: 1,
        });
        rec.on_frame_advance(&FrameAdvanceEvent {
            now: HostTime(3_000_000),
            from: 1,
            to: 4,
            steps: 3,
        });

        let mut out = Vec::new();
        export(rec.events(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        let names: Vec<_> = parsed.iter().map(|v| v["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["heroFrame", "heroFrame", "LateTick"]);
        assert_eq!(parsed[2]["args"]["steps"], 3);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty(), "no events, empty array");
    }
}
