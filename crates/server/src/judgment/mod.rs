//! Judgment engine: the pure rules of the adjudication workflow.
//!
//! `vote_text` turns structured voting choices into legal prose under a
//! fixed grammar; `transitions` centralizes every status guard so the repo
//! layer is the only writer of status fields and always goes through here.

pub mod transitions;
pub mod vote_text;
