//! Command handlers.

pub mod check;
pub mod init;
pub mod items;
pub mod misc;
pub mod passwd;
pub mod show;
