//! Typed entities stored in the remote document store.
//!
//! Wire names are camelCase; records carry an `eliminado` soft-delete
//! flag instead of being removed, and cross-entity references are plain
//! document-ID strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered municipality with its fiscal address data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Municipio {
    #[serde(default)]
    pub id: String,
    pub rfc: String,
    pub denominacion: String,
    pub codigo_postal: String,
    pub tipo_vialidad: Option<String>,
    pub nombre_vialidad: String,
    pub numero_exterior: String,
    pub numero_interior: Option<String>,
    pub nombre_colonia: Option<String>,
    pub nombre_localidad: String,
    pub municipio: String,
    pub entidad_federativa: String,
    pub entre_calle: Option<String>,
    pub otra_calle: Option<String>,
    /// Public URL of the municipality image, if one was uploaded.
    pub imagen: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
    #[serde(default)]
    pub eliminado: bool,
}

/// Authority (signing official) attached to a municipality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Autoridad {
    #[serde(default)]
    pub id: String,
    pub nombre: String,
    pub puesto: String,
    /// ID of the owning municipality document.
    pub municipio_id: String,
    pub fecha_creacion: DateTime<Utc>,
    #[serde(default)]
    pub eliminado: bool,
}

/// Vehicle available for fuel-consumption letters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehiculo {
    #[serde(default)]
    pub id: String,
    pub marca: String,
    pub modelo: String,
    pub placa: String,
    pub km_por_litro: f64,
    /// ID of the owning municipality document.
    pub municipio_id: String,
    pub fecha_creacion: DateTime<Utc>,
    #[serde(default)]
    pub eliminado: bool,
}

/// Supplier company with its branding assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Empresa {
    #[serde(default)]
    pub id: String,
    pub razon_social: String,
    pub rfc: String,
    /// Public URL of the company logo.
    pub logo_url: Option<String>,
    /// Public URL of the letterhead template document.
    pub hoja_membretada_url: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
    #[serde(default)]
    pub eliminado: bool,
}

/// Processing state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoSolicitud {
    #[serde(rename = "Pendiente")]
    Pendiente,
    #[serde(rename = "En Proceso")]
    EnProceso,
    #[serde(rename = "Completada")]
    Completada,
}

impl Default for EstadoSolicitud {
    fn default() -> Self {
        Self::Pendiente
    }
}

/// Work request filed against a municipality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solicitud {
    #[serde(default)]
    pub id: String,
    pub descripcion: String,
    pub solicitante: String,
    /// ID of the municipality the request belongs to.
    pub municipio_id: String,
    #[serde(default)]
    pub estado: EstadoSolicitud,
    /// Date the request is for, as entered by the user.
    pub fecha: String,
    pub fecha_creacion: DateTime<Utc>,
    #[serde(default)]
    pub eliminado: bool,
}

/// Normalize a municipality denomination into a storage-safe slug.
///
/// Lowercases, strips diacritics from the vowels and ñ, and collapses
/// whitespace runs into single hyphens.
pub fn normaliza_denominacion(denominacion: &str) -> String {
    let mut slug = String::with_capacity(denominacion.len());
    let mut last_was_hyphen = true;
    for c in denominacion.trim().to_lowercase().chars() {
        let mapped = match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            c if c.is_whitespace() => '-',
            c => c,
        };
        if mapped == '-' {
            if !last_was_hyphen {
                slug.push('-');
                last_was_hyphen = true;
            }
        } else {
            slug.push(mapped);
            last_was_hyphen = false;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
