//! Chat-bot front-end for the reading diary.
//!
//! Text commands are parsed into [`command::Command`] values, executed
//! against the Book Record Store by [`handler`], and rendered back into
//! plain text by [`reply`]. [`telegram`] and [`polling`] connect that
//! pipeline to the Telegram Bot API.

pub mod command;
pub mod config;
pub mod handler;
pub mod polling;
pub mod reply;
pub mod telegram;
