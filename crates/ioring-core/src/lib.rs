//! I/O Ring Core Types and Definitions
//!
//! This crate provides the foundational types shared by the intent-graph
//! parser and the ring layout engine. It includes:
//!
//! - **Geometry**: Ring sides, corners and the perimeter ⇄ coordinate mapping ([`geometry`] module)
//! - **Classification**: Device label classification ([`classify`] module)
//! - **Instances**: Declared ring elements and their positions ([`instance`] module)
//! - **Configuration**: Ring-level parameters and their defaults ([`config`] module)
//! - **Catalog**: Filler and separator cells ([`catalog`] module)

pub mod catalog;
pub mod classify;
pub mod config;
pub mod geometry;
pub mod instance;
