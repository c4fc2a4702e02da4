use super::chunk::DocumentId;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub source_url: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Docx,
    Text,
}

impl ContentType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime
            .split(';')
            .next()
            .unwrap_or(mime)
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            | "application/msword" => Some(Self::Docx),
            "text/plain" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn from_url_path(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url).to_lowercase();
        if path.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if path.ends_with(".docx") || path.ends_with(".doc") {
            Some(Self::Docx)
        } else if path.ends_with(".txt") || path.ends_with(".md") {
            Some(Self::Text)
        } else {
            None
        }
    }

    /// The server's content-type header wins, the URL extension is the
    /// fallback, PDF the default.
    pub fn detect(mime: Option<&str>, url: &str) -> Self {
        mime.and_then(Self::from_mime)
            .or_else(|| Self::from_url_path(url))
            .unwrap_or(Self::Pdf)
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Text => "text/plain",
        }
    }
}

impl Document {
    pub fn new(source_url: String, content_type: ContentType, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            source_url,
            content_type,
            size_bytes,
        }
    }
}
