//! Geometry utilities for bend-mesh.
//!
//! This module provides the handedness and face-orientation checks used to
//! validate generated blocks and boundary faces.

pub mod quality;
