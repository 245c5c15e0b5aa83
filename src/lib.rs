//! # Freshet
//!
//! A terminal feed reader built around one interactive reading session.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → FeedService → Session (TUI)
//! ```
//!
//! - [`fetcher`]: HTTP client with ETag/conditional request support
//! - [`normalizer`]: Converts RSS/Atom feeds to display entries
//! - [`feeds`]: The session's collaborators — fetch-all, article rendering,
//!   browser handoff — behind narrow traits
//! - [`tui`]: The reading session itself: list view, article view,
//!   autonomous refresh
//!
//! ## Quick Start
//!
//! ```bash
//! # Subscribe to feeds in ~/.config/freshet/config.toml, then:
//! freshet            # launch the reader
//! freshet list       # print entries without the TUI
//! freshet update     # force-fetch everything once
//! ```
//!
//! The session shows the merged entry list; Enter opens an article inline
//! (or in the browser with `open_in_browser`), `r` refreshes on demand, and
//! an expired countdown refreshes autonomously every 15 minutes by default.

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) hands the session its three collaborator
/// seams as trait objects.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/freshet/config.toml`, supporting:
/// - Subscribed feeds and a single-feed preview mode
/// - Custom colors (named or hex) and keybindings
/// - The autonomous refresh interval
pub mod config;

/// Core domain records: [`Entry`](domain::Entry) as fetched, and the
/// [`DisplayItem`](domain::DisplayItem) the session keeps per row.
pub mod domain;

/// Session-facing collaborator traits and their production implementation.
pub mod feeds;

/// HTTP fetching with conditional request support.
pub mod fetcher;

/// Feed parsing and normalization.
pub mod normalizer;

/// The interactive reading session.
///
/// A single-threaded event loop drives a two-mode state machine (feed list /
/// article view) with vi-style navigation, a `gg`/`G` jump gesture, and a
/// recurring refresh countdown. Collaborator failures end the session.
pub mod tui;
