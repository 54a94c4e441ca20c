// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for folio page
//! diagnostics.
//!
//! This crate provides [`TraceSink`](folio_core::trace::TraceSink)
//! implementations for development and host-side replay of the reactor:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory log of owned
//!   [`recorder::RecordedEvent`]s.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from a
//!   recording.

pub mod chrome;
pub mod pretty;
pub mod recorder;
