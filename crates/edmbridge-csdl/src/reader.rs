//! EDMX XML reader.
//!
//! Deserializes a CSDL document with quick-xml's serde support. Element
//! prefixes (`edmx:`) are matched by local name; elements and attributes the
//! model does not know about are skipped.

use std::path::Path;

use tracing::debug;

use crate::error::CsdlError;
use crate::model::Edmx;

/// Parses an EDMX document from a string.
///
/// # Errors
///
/// Returns [`CsdlError::Xml`] when the text is not a well-formed CSDL document.
pub fn from_xml_str(xml: &str) -> Result<Edmx, CsdlError> {
    let edmx: Edmx = quick_xml::de::from_str(xml)?;

    debug!(
        version = ?edmx.version,
        schemas = edmx.data_services.schemas.len(),
        "Parsed CSDL document"
    );

    Ok(edmx)
}

/// Reads and parses an EDMX document from a file.
///
/// # Errors
///
/// Returns [`CsdlError::Io`] if the file cannot be read and
/// [`CsdlError::Xml`] if it cannot be parsed.
pub fn from_xml_file(path: impl AsRef<Path>) -> Result<Edmx, CsdlError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading CSDL document");

    let content = std::fs::read_to_string(path).map_err(|e| CsdlError::io(path, e))?;
    from_xml_str(&content)
}
