//! Core domain for calshare: entities, storage contracts, the permission
//! resolver and the account/calendar services.

pub mod access;
pub mod calendar;
pub mod service;
pub mod storage;
