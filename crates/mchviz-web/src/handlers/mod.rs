//! HTTP handlers for all web routes.

pub mod account;
pub mod genes;
pub mod pages;
pub mod params;
pub mod plots;
