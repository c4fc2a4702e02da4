mod http_document_source;

pub use http_document_source::HttpDocumentSource;
