//! Subtrack - Subscription tracking service
//!
//! Tracks recurring payment obligations per user, derives renewal dates,
//! keeps status consistent with elapsed time, and answers the
//! upcoming-renewals query that drives reminder scheduling.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
