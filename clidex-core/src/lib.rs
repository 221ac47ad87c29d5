//! Clidex core library.
//!
//! Builds a versioned, flattened catalog of a command-line interface from a
//! host framework's command graph and renders it as text or JSON.
//!
//! The pipeline is [`walk`] -> [`CatalogBuilder`] -> [`Catalog`] ->
//! [`render`]. Hosts participate by implementing [`HostCommand`] and
//! [`HostParam`] for their own command objects.
//!
//! # Determinism
//!
//! Commands appear in depth-first pre-order with siblings in the host's
//! declared order (or sorted by name when the host reports no order), so
//! two builds over an unchanged tree render byte-identical output.

mod builder;
mod catalog;
mod error;
mod host;
mod normalize;
mod render;
mod walker;

pub use crate::{
    builder::{CatalogBuilder, derive_usage},
    catalog::{
        CATALOG_VERSION, Catalog, CatalogDocumentError, CommandEntry, Literal, ParamDescriptor,
        ParamKind, TypeTag,
    },
    error::{
        ParamNormalizationWarning, ParamNormalizationWarningCode, RenderError, Result,
        StructuralError, StructuralErrorCode,
    },
    host::{Children, CommandKind, HostCommand, HostParam, HostValue, NodeId},
    render::{RenderFormat, render, render_json, render_text},
    walker::{WalkOptions, WalkedNode, walk},
};
