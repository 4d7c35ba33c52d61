//! Deck UI Enhancement Layer
//!
//! Client-side behavior for the server-rendered deck pages: theme
//! persistence, toast notifications, keyboard shortcuts, drag-to-reorder
//! synchronization, lazy images, scroll reveals and modal focus
//! containment. All business logic lives on the server; this layer only
//! wires events to the markup it renders.

pub mod app;
pub mod csrf;
pub mod dom;
pub mod exports;
pub mod focus;
pub mod keyboard;
pub mod lazy;
pub mod net;
pub mod panels;
pub mod reorder;
pub mod reveal;
pub mod theme;
pub mod toast;
