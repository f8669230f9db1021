//! Document types accepted by the ingestion pipeline.

use std::path::Path;

/// Supported document types, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    PlainText,
    Markdown,
    Html,
    Xml,
    Json,
    Csv,
    Tsv,
    Pdf,
    Doc,
    Docx,
    Ppt,
    Pptx,
    Xls,
    Xlsx,
    Eml,
    Msg,
    Epub,
    Rtf,
    Odt,
    Org,
    Rst,
    Png,
    Jpeg,
    Heic,
}

impl FileType {
    /// Detect file type from an extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let file_type = match ext.to_lowercase().as_str() {
            "txt" | "text" => Self::PlainText,
            "md" | "markdown" => Self::Markdown,
            "html" | "htm" => Self::Html,
            "xml" => Self::Xml,
            "json" => Self::Json,
            "csv" => Self::Csv,
            "tsv" => Self::Tsv,
            "pdf" => Self::Pdf,
            "doc" => Self::Doc,
            "docx" => Self::Docx,
            "ppt" => Self::Ppt,
            "pptx" => Self::Pptx,
            "xls" => Self::Xls,
            "xlsx" => Self::Xlsx,
            "eml" => Self::Eml,
            "msg" => Self::Msg,
            "epub" => Self::Epub,
            "rtf" => Self::Rtf,
            "odt" => Self::Odt,
            "org" => Self::Org,
            "rst" => Self::Rst,
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            "heic" => Self::Heic,
            _ => return None,
        };
        Some(file_type)
    }

    /// Detect file type from a path. Extensionless names are unsupported.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether the pipeline can partition this path.
    pub fn is_supported(path: impl AsRef<Path>) -> bool {
        Self::from_path(path).is_some()
    }

    /// Check if this is a text-based file type.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::PlainText
                | Self::Markdown
                | Self::Html
                | Self::Xml
                | Self::Json
                | Self::Csv
                | Self::Tsv
                | Self::Org
                | Self::Rst
        )
    }

    /// Check if this is an image that needs OCR.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Png | Self::Jpeg | Self::Heic)
    }
}
