//! Core error types for diagram processing
//!
//! This module defines the error type returned by model mutations and
//! export entry points.

use thiserror::Error;

use super::{BoxId, LabelRef, LineId, Rect};

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Unknown box: {id}")]
    UnknownBox { id: BoxId },

    #[error("Unknown line: {id}")]
    UnknownLine { id: LineId },

    #[error("Unknown label: {label}")]
    UnknownLabel { label: LabelRef },

    #[error("Degenerate box {bounds:?}: a box needs at least one interior cell")]
    DegenerateBox { bounds: Rect },

    #[error("A line must start on a box")]
    LineMustStartOnBox,

    #[error("Invalid canvas size {columns}x{rows}: both dimensions must be positive")]
    InvalidCanvas { columns: usize, rows: usize },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new unknown-box error
    pub fn unknown_box(id: BoxId) -> Self {
        Self::UnknownBox { id }
    }

    /// Create a new unknown-line error
    pub fn unknown_line(id: LineId) -> Self {
        Self::UnknownLine { id }
    }

    /// Create a new unknown-label error
    pub fn unknown_label(label: LabelRef) -> Self {
        Self::UnknownLabel { label }
    }

    /// Create a new invalid-canvas error
    pub fn invalid_canvas(columns: usize, rows: usize) -> Self {
        Self::InvalidCanvas { columns, rows }
    }
}

/// Result alias for model operations
pub type Result<T> = std::result::Result<T, DiagramError>;
