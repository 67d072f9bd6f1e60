//! docgraph Domain Layer
//!
//! Core model for the document graph client. Everything in here is pure:
//! no I/O, no serialization, no network. The SDK and CLI crates translate
//! wire formats into these types and back out to renderable documents.
//!
//! ## Key Concepts
//!
//! - **Triple**: a subject-relation-object statement extracted from a document
//! - **Cluster id**: integer grouping of a node, used only for coloring
//! - **Projection**: deduplicated nodes plus one edge per triple
//! - **Layout configuration**: tuning constants for the force-directed layout
//! - **Transcript**: ordered question/answer turns about the uploaded document

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chat;
pub mod document;
pub mod graph;
pub mod layout;
pub mod style;
pub mod triple;

// Re-exports for convenience
pub use chat::{ChatTurn, Transcript};
pub use document::DocumentKind;
pub use graph::{project, ClusterMap, GraphEdge, GraphNode, Projection};
pub use layout::{LayoutConfig, LayoutError, Palette};
pub use style::{cluster_style_rules, color_for_cluster, StyleRule};
pub use triple::{ClusterAssignment, Triple};
