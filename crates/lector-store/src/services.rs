//! Typed services over the generic document store, one per collection.
//!
//! Every list operation hides soft-deleted records; `eliminar` flips the
//! `eliminado` flag instead of removing the document.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::client::{Document, DocumentStore};
use crate::entities::{
    Autoridad, Empresa, EstadoSolicitud, Municipio, Solicitud, Vehiculo, normaliza_denominacion,
};
use crate::error::Result;

/// Serialize an entity into a create/update payload, dropping the local
/// `id` field (the store addresses documents by path, not by body).
fn payload<T: Serialize>(entity: &T) -> Result<Value> {
    let mut value = serde_json::to_value(entity)?;
    if let Some(map) = value.as_object_mut() {
        map.remove("id");
    }
    Ok(value)
}

fn is_active(document: &Document) -> bool {
    document.data.get("eliminado").and_then(Value::as_bool) != Some(true)
}

macro_rules! collection_service {
    ($service:ident, $entity:ty, $collection:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $service<'a> {
            store: &'a DocumentStore,
        }

        impl<'a> $service<'a> {
            pub const COLLECTION: &'static str = $collection;

            pub fn new(store: &'a DocumentStore) -> Self {
                Self { store }
            }

            /// List all records that have not been soft-deleted.
            pub async fn listar(&self) -> Result<Vec<$entity>> {
                self.store
                    .list(Self::COLLECTION)
                    .await?
                    .iter()
                    .filter(|d| is_active(d))
                    .map(Document::decode)
                    .collect()
            }

            pub async fn obtener(&self, id: &str) -> Result<$entity> {
                self.store.get(Self::COLLECTION, id).await?.decode()
            }

            pub async fn crear(&self, entity: &$entity) -> Result<String> {
                let id = self
                    .store
                    .create(Self::COLLECTION, &payload(entity)?)
                    .await?;
                info!(collection = Self::COLLECTION, id, "created record");
                Ok(id)
            }

            pub async fn actualizar(&self, id: &str, entity: &$entity) -> Result<()> {
                self.store
                    .update(Self::COLLECTION, id, &payload(entity)?)
                    .await
            }

            /// Soft-delete: mark the record as eliminated, keeping it in
            /// the store.
            pub async fn eliminar(&self, id: &str) -> Result<()> {
                self.store
                    .update(Self::COLLECTION, id, &json!({ "eliminado": true }))
                    .await?;
                info!(collection = Self::COLLECTION, id, "soft-deleted record");
                Ok(())
            }
        }
    };
}

collection_service!(Municipios, Municipio, "municipios");
collection_service!(Autoridades, Autoridad, "autoridades");
collection_service!(Vehiculos, Vehiculo, "vehiculos");
collection_service!(Empresas, Empresa, "empresas");
collection_service!(Solicitudes, Solicitud, "solicitudes");

impl Municipios<'_> {
    /// Find a municipality whose denomination matches `nombre` after slug
    /// normalization on both sides.
    pub async fn por_denominacion(&self, nombre: &str) -> Result<Option<Municipio>> {
        let wanted = normaliza_denominacion(nombre);
        Ok(self
            .listar()
            .await?
            .into_iter()
            .find(|m| normaliza_denominacion(&m.denominacion) == wanted))
    }
}

impl Autoridades<'_> {
    pub async fn por_municipio(&self, municipio_id: &str) -> Result<Vec<Autoridad>> {
        let mut autoridades = self.listar().await?;
        autoridades.retain(|a| a.municipio_id == municipio_id);
        Ok(autoridades)
    }
}

impl Vehiculos<'_> {
    pub async fn por_municipio(&self, municipio_id: &str) -> Result<Vec<Vehiculo>> {
        let mut vehiculos = self.listar().await?;
        vehiculos.retain(|v| v.municipio_id == municipio_id);
        Ok(vehiculos)
    }

    /// Resolve a list of vehicle IDs with concurrent reads, keeping order.
    pub async fn obtener_varios(&self, ids: &[String]) -> Result<Vec<Vehiculo>> {
        self.store
            .get_many(Self::COLLECTION, ids)
            .await?
            .iter()
            .map(Document::decode)
            .collect()
    }
}

impl Solicitudes<'_> {
    /// Requests filed against one municipality. The store has no query
    /// API, so this filters client-side over the full list.
    pub async fn por_municipio(&self, municipio_id: &str) -> Result<Vec<Solicitud>> {
        let mut solicitudes = self.listar().await?;
        solicitudes.retain(|s| s.municipio_id == municipio_id);
        Ok(solicitudes)
    }

    pub async fn cambiar_estado(&self, id: &str, estado: EstadoSolicitud) -> Result<()> {
        self.store
            .update(
                Self::COLLECTION,
                id,
                &json!({ "estado": serde_json::to_value(estado)? }),
            )
            .await
    }
}
