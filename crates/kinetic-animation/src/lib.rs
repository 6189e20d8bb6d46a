//! # Kinetic Animation
//!
//! Animated scene graph for the Kinetic mobile engine.
//!
//! ## Features
//! - Pausable trackers driven by explicit simulation time
//! - Binary mobile tree with independent mesh and arm spin
//! - Arena builder with inherited defaults
//! - Tracker-driven fly camera
//! - Debug helpers for scrubbing animation state

pub mod builder;
pub mod camera;
pub mod debug;
pub mod mobile;
pub mod tracker;

pub use builder::{MobileBuilder, NodeId, NodeMut, Side};
pub use camera::{Camera, CameraAxis};
pub use mobile::Mobile;
pub use tracker::{AnimationTracker, Direction, Speed};

use thiserror::Error;

/// Mobile construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("mobile node {node} is incomplete: missing {field}")]
    Incomplete { node: NodeId, field: &'static str },

    #[error("mobile node {0} has two children but a zero radius")]
    CoincidentChildren(NodeId),

    #[error("only the root can hang from a point, but node {0} has a parent")]
    NotRoot(NodeId),

    #[error("mobile node {node} already has a {side} child")]
    SideOccupied { node: NodeId, side: Side },

    #[error("invalid side of mobile: {0:?}")]
    InvalidSide(String),

    #[error("no mobile node {0} in this builder")]
    UnknownNode(NodeId),
}

/// Result type for mobile construction
pub type BuildResult<T> = Result<T, BuildError>;
