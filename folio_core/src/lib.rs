// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure reactive rules for the portfolio page.
//!
//! `folio_core` owns every decision the page makes about its own chrome:
//! which navigation link is active, whether the mobile nav is hidden, which
//! cards have faded in, which hero frame is showing. It is `no_std`
//! compatible (with `alloc`) and never touches the DOM; a backend crate scans
//! the document, forwards events, and applies the returned effects.
//!
//! # Architecture
//!
//! ```text
//!   Backend (DOM scan)
//!       │
//!       ▼
//!   PageLayout ──► Reactor::new()
//!
//!   browser event ──► Reactor::on_*() ──► Vec<Effect> ──► Presenter::apply()
//!        ▲                                                     │
//!        └──────────── FrameGate / Debounce / Interval ◄───────┘
//! ```
//!
//! **[`reactor`]**: One [`Reactor`](reactor::Reactor) composing every rule
//! behind a single event surface.
//!
//! **[`sections`]**: Active-section tracking by scroll position or by
//! intersection, mirrored onto desktop and mobile links.
//!
//! **[`nav`]**: Sticky header class, hide-on-scroll mobile nav with
//! hysteresis, back-to-top visibility.
//!
//! **[`reveal`]**: One-shot staggered fade-in on first intersection.
//!
//! **[`frames`]**: Eight-frame hero cycle on a fixed period.
//!
//! **[`menu`]** and **[`anchor`]**: Mobile menu, accordions, fragment links,
//! back-to-top and skip link.
//!
//! **[`scheduler`]**: Single-flight frame gate and resize debounce.
//!
//! **[`effect`]**: The [`Effect`](effect::Effect) vocabulary rules speak.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait backends
//! implement.
//!
//! **[`config`]**: [`PageConfig`](config::PageConfig) presets holding every
//! threshold, selector and class name.
//!
//! **[`clock`]** and **[`time`]**: Injectable time source and microsecond
//! time types.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod anchor;
pub mod backend;
pub mod clock;
pub mod config;
pub mod effect;
pub mod frames;
pub mod geometry;
pub mod menu;
pub mod nav;
pub mod page;
pub mod reactor;
pub mod reveal;
pub mod scheduler;
pub mod sections;
pub mod time;
pub mod trace;
