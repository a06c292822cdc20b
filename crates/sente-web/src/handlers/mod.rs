//! Route handlers.

pub mod confirm;
pub mod pages;
pub mod participants;
pub mod subscribe;
