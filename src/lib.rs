//! Encounter Parser — turns generated adventure narrative into structured
//! encounter records.
//!
//! The generator writes loosely formatted text with sigil markers
//! (`$$Roll$$`, `&&Riddle&&`, `%%Check%%`, `##Combat##`, `@@luck@@`) and
//! `**`-delimited sections. This crate slices that text, dispatches on the
//! mechanic, extracts the player's choices, and cleans the prose, producing
//! an [`Encounter`](schema::encounter::Encounter) that is ready to persist
//! or display.

pub mod core;
pub mod schema;
