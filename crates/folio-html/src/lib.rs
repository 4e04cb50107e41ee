//! folio HTML loader
//!
//! Parses page markup with html5ever and converts it into a
//! [`folio_dom::Document`].

mod parser;

pub use parser::HtmlLoader;

use folio_dom::Document;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, LoadError> {
    HtmlLoader::new().parse(html)
}

/// Loading error
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read markup: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document has no <body>")]
    MissingBody,
}
