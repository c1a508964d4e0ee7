//! Associate document registry.
//!
//! The in-memory store behind the "Upload de Documentos" page: files
//! accepted by an upload session are attached to an associate with a
//! document type. Nothing is persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::MIB;
use crate::error::{DocumentError, DocumentResult};
use crate::models::CandidateFile;

// =============================================================================
// Document Types
// =============================================================================

/// Kind of document kept for an associate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Id,
    Bpc,
    Medical,
    Income,
    Address,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 6] = [
        DocumentType::Id,
        DocumentType::Bpc,
        DocumentType::Medical,
        DocumentType::Income,
        DocumentType::Address,
        DocumentType::Other,
    ];

    /// Label shown in selects and lists.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Id => "Documento de Identidade",
            DocumentType::Bpc => "Comprovante BPC",
            DocumentType::Medical => "Laudo Médico",
            DocumentType::Income => "Comprovante de Renda",
            DocumentType::Address => "Comprovante de Endereço",
            DocumentType::Other => "Outro",
        }
    }

    /// Form value (`id`, `bpc`, ...).
    pub fn slug(&self) -> &'static str {
        match self {
            DocumentType::Id => "id",
            DocumentType::Bpc => "bpc",
            DocumentType::Medical => "medical",
            DocumentType::Income => "income",
            DocumentType::Address => "address",
            DocumentType::Other => "other",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentType {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim().to_ascii_lowercase();
        DocumentType::ALL
            .into_iter()
            .find(|t| t.slug() == slug)
            .ok_or_else(|| DocumentError::UnknownDocumentType(s.to_string()))
    }
}

// =============================================================================
// Records
// =============================================================================

/// A registered associate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Associate {
    pub id: String,
    pub name: String,
    /// CPF
    pub document_id: String,
}

/// A file attached to an associate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociateDocument {
    pub id: String,
    pub associate_id: String,
    pub file_name: String,
    pub file_type: String,
    /// Display size, e.g. "1.2 MB"
    pub file_size: String,
    pub document_type: DocumentType,
    #[serde(default)]
    pub description: String,
    pub upload_date: NaiveDate,
}

impl AssociateDocument {
    pub fn is_pdf(&self) -> bool {
        self.file_type.contains("pdf")
    }
}

/// One decimal megabyte string, e.g. `1.2 MB`.
pub fn format_size(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / MIB as f64)
}

// =============================================================================
// Registry
// =============================================================================

/// In-memory associates and their documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    associates: Vec<Associate>,
    documents: Vec<AssociateDocument>,
    next_id: usize,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Registry seeded with the demo associates and documents.
    pub fn with_sample_data() -> Self {
        let mut registry = Self::new();

        for (id, name, cpf) in [
            ("1", "Ana Maria Silva", "123.456.789-00"),
            ("2", "João Carlos Oliveira", "987.654.321-00"),
            ("3", "Márcia Rodrigues", "456.789.123-00"),
        ] {
            registry.add_associate(Associate {
                id: id.to_string(),
                name: name.to_string(),
                document_id: cpf.to_string(),
            });
        }

        for (associate, file, mime, size, doc_type, (y, m, d)) in [
            ("1", "comprovante_bpc_2023.pdf", "application/pdf", "1.2 MB", DocumentType::Bpc, (2023, 5, 10)),
            ("1", "documento_identidade.jpg", "image/jpeg", "0.8 MB", DocumentType::Id, (2023, 4, 15)),
            ("2", "laudo_medico.pdf", "application/pdf", "2.4 MB", DocumentType::Medical, (2023, 6, 22)),
        ] {
            let id = registry.allocate_id();
            registry.documents.push(AssociateDocument {
                id,
                associate_id: associate.to_string(),
                file_name: file.to_string(),
                file_type: mime.to_string(),
                file_size: size.to_string(),
                document_type: doc_type,
                description: String::new(),
                upload_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            });
        }

        registry
    }

    pub fn add_associate(&mut self, associate: Associate) {
        self.associates.push(associate);
    }

    pub fn associates(&self) -> &[Associate] {
        &self.associates
    }

    pub fn associate(&self, id: &str) -> Option<&Associate> {
        self.associates.iter().find(|a| a.id == id)
    }

    pub fn documents(&self) -> &[AssociateDocument] {
        &self.documents
    }

    /// Documents of one associate, oldest first.
    pub fn documents_for(&self, associate_id: &str) -> Vec<&AssociateDocument> {
        self.documents
            .iter()
            .filter(|d| d.associate_id == associate_id)
            .collect()
    }

    /// Attach an uploaded file to an associate.
    ///
    /// Both the associate and the document type must be selected.
    pub fn attach<H>(
        &mut self,
        associate_id: Option<&str>,
        document_type: Option<DocumentType>,
        description: &str,
        file: &CandidateFile<H>,
        upload_date: NaiveDate,
    ) -> DocumentResult<&AssociateDocument> {
        let (associate_id, document_type) = match (associate_id, document_type) {
            (Some(id), Some(doc_type)) if !id.trim().is_empty() => (id, doc_type),
            _ => return Err(DocumentError::MissingSelection),
        };

        if self.associate(associate_id).is_none() {
            return Err(DocumentError::UnknownAssociate(associate_id.to_string()));
        }

        let document = AssociateDocument {
            id: self.allocate_id(),
            associate_id: associate_id.to_string(),
            file_name: file.name().to_string(),
            file_type: file.mime_type().to_string(),
            file_size: format_size(file.size_bytes()),
            document_type,
            description: description.trim().to_string(),
            upload_date,
        };
        log::info!(
            "📎 Attached {} to associate {} as {}",
            document.file_name,
            associate_id,
            document.document_type.slug()
        );

        self.documents.push(document);
        self.documents
            .last()
            .ok_or_else(|| DocumentError::NotFound(associate_id.to_string()))
    }

    /// Remove a document and return it.
    pub fn delete(&mut self, document_id: &str) -> DocumentResult<AssociateDocument> {
        let index = self
            .documents
            .iter()
            .position(|d| d.id == document_id)
            .ok_or_else(|| DocumentError::NotFound(document_id.to_string()))?;
        Ok(self.documents.remove(index))
    }

    fn allocate_id(&mut self) -> String {
        let id = format!("d{}", self.next_id.max(1));
        self.next_id = self.next_id.max(1) + 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_sample_data() {
        let registry = DocumentRegistry::with_sample_data();
        assert_eq!(registry.associates().len(), 3);
        assert_eq!(registry.documents_for("1").len(), 2);
        assert_eq!(registry.documents_for("3").len(), 0);
        assert_eq!(registry.documents()[2].id, "d3");
        assert!(registry.documents()[0].is_pdf());
    }

    #[test]
    fn test_attach_requires_selection() {
        let mut registry = DocumentRegistry::with_sample_data();
        let file = CandidateFile::new("rg.png", "image/png", 1024);

        let err = registry
            .attach(None, Some(DocumentType::Id), "", &file, today())
            .unwrap_err();
        assert_eq!(err, DocumentError::MissingSelection);

        let err = registry.attach(Some("1"), None, "", &file, today()).unwrap_err();
        assert_eq!(err, DocumentError::MissingSelection);

        let err = registry
            .attach(Some("99"), Some(DocumentType::Id), "", &file, today())
            .unwrap_err();
        assert_eq!(err, DocumentError::UnknownAssociate("99".into()));
    }

    #[test]
    fn test_attach_records_file() {
        let mut registry = DocumentRegistry::with_sample_data();
        let file = CandidateFile::new("renda.pdf", "application/pdf", 1_258_291);

        let doc = registry
            .attach(Some("3"), Some(DocumentType::Income), "  março  ", &file, today())
            .unwrap()
            .clone();

        assert_eq!(doc.id, "d4");
        assert_eq!(doc.file_size, "1.2 MB");
        assert_eq!(doc.description, "março");
        assert_eq!(doc.document_type.label(), "Comprovante de Renda");
        assert_eq!(registry.documents_for("3"), vec![&doc]);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut registry = DocumentRegistry::with_sample_data();
        let removed = registry.delete("d3").unwrap();
        assert_eq!(removed.file_name, "laudo_medico.pdf");
        assert_eq!(registry.delete("d3").unwrap_err(), DocumentError::NotFound("d3".into()));

        let file = CandidateFile::new("x.pdf", "application/pdf", 1);
        let doc = registry
            .attach(Some("2"), Some(DocumentType::Other), "", &file, today())
            .unwrap();
        assert_eq!(doc.id, "d4");
    }

    #[test]
    fn test_document_type_parsing() {
        assert_eq!("BPC".parse::<DocumentType>().unwrap(), DocumentType::Bpc);
        assert_eq!(" address ".parse::<DocumentType>().unwrap(), DocumentType::Address);
        assert!("passport".parse::<DocumentType>().is_err());
        assert_eq!(DocumentType::Medical.to_string(), "Laudo Médico");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.0 MB");
        assert_eq!(format_size(2 * MIB), "2.0 MB");
        assert_eq!(format_size(838_861), "0.8 MB");
    }
}
