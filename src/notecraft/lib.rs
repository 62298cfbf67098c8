//! # Notecraft Architecture
//!
//! Notecraft is a **UI-agnostic research note library** with a CLI client. It mints
//! document identifiers, segments free text into paragraphs and bullets, validates
//! the repeatable form rows and lays a note out as a terminal preview or a
//! printable HTML page.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, sets up logging        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Applies configuration and per-call policy overrides      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business operations returning `CmdResult`                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (sequence, segment, validation, outline, render)      │
//! │  - Pure logic; the sequencer talks to storage via a trait   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - SequenceStore trait                                      │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout/stderr, calls
//! `std::process::exit` or reads the clock. Diagnostics go through `tracing`;
//! the binary decides whether and where they are printed.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business operations
//! - [`sequence`]: Category codes, bucket counters, session ids
//! - [`segment`]: Paragraph, line and bullet segmentation
//! - [`validation`]: Co-author and source row policies
//! - [`outline`]: Renderer-neutral document outline
//! - [`render`]: Text preview and print HTML
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Form data types
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod images;
pub mod model;
pub mod outline;
pub mod render;
pub mod segment;
pub mod sequence;
pub mod store;
pub mod validation;
