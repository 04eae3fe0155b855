//! Document upload slots

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Reference to a file attached to a document slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
}

impl AttachedFile {
    /// Build a reference to an existing regular file
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        if !metadata.is_file() {
            bail!("{} is not a file", path.display());
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            size_bytes: metadata.len(),
        })
    }
}

/// One requested document. Attached-file presence is the only completion signal.
#[derive(Debug, Clone)]
pub struct DocumentSlot {
    pub id: String,
    pub name: String,
    pub description: String,
    pub required: bool,
    pub file: Option<AttachedFile>,
    /// Path being typed before it is attached
    pub path_input: String,
}

impl DocumentSlot {
    pub fn new(id: &str, name: &str, description: &str, required: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            required,
            file: None,
            path_input: String::new(),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.file.is_some()
    }

    pub fn is_satisfied(&self) -> bool {
        !self.required || self.is_attached()
    }

    /// Attach the file named by `path_input`
    pub fn attach_from_input(&mut self) -> Result<()> {
        let input = self.path_input.trim();
        if input.is_empty() {
            bail!("Enter a file path for {}", self.name);
        }
        let file = AttachedFile::from_path(Path::new(input))?;
        self.file = Some(file);
        self.path_input.clear();
        Ok(())
    }

    pub fn detach(&mut self) -> bool {
        self.file.take().is_some()
    }
}

/// The documents section form
#[derive(Debug, Clone)]
pub struct DocumentsForm {
    pub slots: Vec<DocumentSlot>,
    pub active_slot_index: usize,
}

impl DocumentsForm {
    pub fn new() -> Self {
        Self {
            slots: vec![
                DocumentSlot::new(
                    "id-proof",
                    "Photo ID",
                    "Government-issued photo identification (e.g., driver's license, passport)",
                    true,
                ),
                DocumentSlot::new(
                    "income-proof",
                    "Proof of Income",
                    "Recent pay stubs, W-2, or tax returns from the last year",
                    true,
                ),
                DocumentSlot::new(
                    "residence-proof",
                    "Proof of Residence",
                    "Utility bill, lease agreement, or mortgage statement",
                    true,
                ),
                DocumentSlot::new(
                    "other-income",
                    "Other Income Documentation",
                    "Documentation for additional income sources (if applicable)",
                    false,
                ),
            ],
            active_slot_index: 0,
        }
    }

    /// Complete iff every required slot has an attached file
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(DocumentSlot::is_satisfied)
    }

    pub fn attached_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_attached()).count()
    }
}

impl Default for DocumentsForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn attach_stub(form: &mut DocumentsForm, id: &str) {
        let slot = form.slots.iter_mut().find(|s| s.id == id).unwrap();
        slot.file = Some(AttachedFile {
            path: PathBuf::from(format!("/tmp/{id}.pdf")),
            file_name: format!("{id}.pdf"),
            size_bytes: 1,
        });
    }

    #[test]
    fn test_new_form_is_incomplete() {
        let form = DocumentsForm::new();
        assert_eq!(form.slots.len(), 4);
        assert!(!form.is_complete());
    }

    #[test]
    fn test_required_slots_complete_the_form() {
        let mut form = DocumentsForm::new();
        attach_stub(&mut form, "id-proof");
        attach_stub(&mut form, "income-proof");
        attach_stub(&mut form, "residence-proof");
        assert!(form.is_complete());
    }

    #[test]
    fn test_missing_required_slot_keeps_form_incomplete() {
        let mut form = DocumentsForm::new();
        attach_stub(&mut form, "id-proof");
        attach_stub(&mut form, "income-proof");
        attach_stub(&mut form, "other-income");
        assert!(!form.is_complete());
    }

    #[test]
    fn test_detach_reopens_form() {
        let mut form = DocumentsForm::new();
        for id in ["id-proof", "income-proof", "residence-proof"] {
            attach_stub(&mut form, id);
        }
        let income = form.slots.iter_mut().find(|s| s.id == "income-proof").unwrap();
        assert!(income.detach());
        assert!(!form.is_complete());
    }

    #[test]
    fn test_attach_from_input_reads_real_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "pay stub").unwrap();

        let mut slot = DocumentSlot::new("income-proof", "Proof of Income", "", true);
        slot.path_input = tmp.path().display().to_string();
        slot.attach_from_input().unwrap();

        let file = slot.file.as_ref().unwrap();
        assert_eq!(file.size_bytes, 8);
        assert!(slot.path_input.is_empty());
    }

    #[test]
    fn test_attach_from_input_rejects_missing_file() {
        let mut slot = DocumentSlot::new("id-proof", "Photo ID", "", true);
        slot.path_input = "/definitely/not/here.pdf".to_string();
        assert!(slot.attach_from_input().is_err());
        assert!(!slot.is_attached());
    }

    #[test]
    fn test_attach_from_input_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut slot = DocumentSlot::new("id-proof", "Photo ID", "", true);
        slot.path_input = dir.path().display().to_string();
        assert!(slot.attach_from_input().is_err());
    }

    #[test]
    fn test_attach_from_blank_input_fails() {
        let mut slot = DocumentSlot::new("id-proof", "Photo ID", "", true);
        slot.path_input = "   ".to_string();
        assert!(slot.attach_from_input().is_err());
    }
}
