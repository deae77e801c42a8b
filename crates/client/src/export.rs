//! Ticket export utilities.
//!
//! The storefront's download flow hands a rendered ticket to an external
//! PDF/QR rasterizer; what belongs to the client is everything the
//! renderer consumes: the QR payload encoding the admission code, the
//! derived download filename, and the paginated document model. Any
//! failure surfaces as an [`ExportError`] for display - no retry, and a
//! failed export never leaves a partial file behind.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ticketgate_core::{Event, Ticket, Venue};

/// Errors that can occur while preparing or saving a ticket export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Payload or document could not be encoded.
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// QR payload is not base64-wrapped JSON of the expected shape.
    #[error("Invalid QR payload: {0}")]
    InvalidPayload(String),

    /// Writing the export failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What the scanner decodes out of the QR image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub code: String,
    pub event_id: i64,
    pub event_title: String,
}

/// The document model handed to a PDF renderer: one page per ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDocument {
    pub filename: String,
    pub pages: Vec<TicketPage>,
}

/// A single rendered ticket page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPage {
    pub event_title: String,
    pub venue_line: String,
    pub starts_at: String,
    pub holder: String,
    pub code: String,
    pub qr_payload: String,
}

/// Base64-encoded JSON payload embedded in the ticket QR code.
///
/// The staff scan flow decodes this same shape to recover the admission
/// code.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized.
pub fn qr_payload(ticket: &Ticket, event: &Event) -> Result<String, ExportError> {
    let payload = QrPayload {
        code: ticket.code.to_string(),
        event_id: event.id.as_i64(),
        event_title: event.title.clone(),
    };
    let json = serde_json::to_vec(&payload)?;
    Ok(BASE64.encode(json))
}

/// Decode a QR payload back into its parts.
///
/// # Errors
///
/// Returns an error if the input is not base64-wrapped JSON of the
/// expected shape.
pub fn decode_qr_payload(raw: &str) -> Result<QrPayload, ExportError> {
    let bytes = BASE64
        .decode(raw.trim())
        .map_err(|e| ExportError::InvalidPayload(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ExportError::InvalidPayload(e.to_string()))
}

/// Derive the download filename: slugified event title plus code suffix.
#[must_use]
pub fn export_filename(event: &Event, ticket: &Ticket) -> String {
    let slug = slugify(&event.title);
    let slug = if slug.is_empty() { "ticket" } else { &slug };
    format!("{slug}-{}.pdf", ticket.code)
}

/// Build the renderable document for a batch of tickets to one event.
///
/// # Errors
///
/// Returns an error if a QR payload cannot be encoded.
pub fn build_document(
    tickets: &[Ticket],
    event: &Event,
    venue: &Venue,
    holder: &str,
) -> Result<TicketDocument, ExportError> {
    let filename = tickets.first().map_or_else(
        || format!("{}.pdf", slugify(&event.title)),
        |t| export_filename(event, t),
    );

    let pages = tickets
        .iter()
        .map(|ticket| {
            Ok(TicketPage {
                event_title: event.title.clone(),
                venue_line: format!("{}, {}", venue.name, venue.address),
                starts_at: event.starts_at.to_rfc3339(),
                holder: holder.to_string(),
                code: ticket.code.to_string(),
                qr_payload: qr_payload(ticket, event)?,
            })
        })
        .collect::<Result<Vec<_>, ExportError>>()?;

    Ok(TicketDocument { filename, pages })
}

/// Serialize the document and write it in one shot.
///
/// The bytes are fully assembled before any I/O happens, so a failed
/// export leaves nothing on disk.
///
/// # Errors
///
/// Returns an error if encoding or the single write fails.
pub fn write_document(document: &TicketDocument, dir: &Path) -> Result<PathBuf, ExportError> {
    let bytes = serde_json::to_vec_pretty(document)?;
    let stem = document
        .filename
        .strip_suffix(".pdf")
        .unwrap_or(&document.filename);
    let path = dir.join(format!("{stem}.json"));
    std::fs::write(&path, bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}
