//! Remote document-store client for the municipal console.
//!
//! This crate provides:
//! - a generic per-collection JSON document client
//! - typed entities and services (municipios, autoridades, vehiculos,
//!   empresas, solicitudes) with soft-delete semantics
//! - path-addressed object storage and the auxiliary docgen endpoint

pub mod client;
pub mod entities;
pub mod error;
pub mod services;
pub mod storage;

pub use client::{Document, DocumentStore};
pub use entities::{
    Autoridad, Empresa, EstadoSolicitud, Municipio, Solicitud, Vehiculo, normaliza_denominacion,
};
pub use error::{Result, StoreError};
pub use services::{Autoridades, Empresas, Municipios, Solicitudes, Vehiculos};
pub use storage::{DocgenEndpoint, ObjectStorage};
