//! Route Handlers

pub mod batch;
pub mod bed;
pub mod health;
pub mod predict;
