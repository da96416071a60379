//! # Wizard Draft
//!
//! The not-yet-submitted report. Text fields are set one at a time as the
//! user types; photos are appended in batches from the file picker and
//! removed by position.

use serde::{Deserialize, Serialize};

use authentica_core::AppConfig;
use authentica_state::{PhotoHandle, ReportDetails};

use crate::error::ReportError;

/// A text field of the report form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    /// Step 1.
    StoreName,
    /// Step 1.
    Location,
    /// Step 1.
    IssueType,
    /// Step 2.
    Description,
    /// Step 2.
    PurchaseInfo,
}

/// Attachment limits applied by [`WizardDraft::add_photos`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoPolicy {
    /// Reject handles whose content type is not `image/*`.
    pub images_only: bool,
    /// Cap on the number of attached photos.
    pub max_photos: Option<usize>,
}

impl Default for PhotoPolicy {
    fn default() -> Self {
        Self {
            images_only: true,
            max_photos: None,
        }
    }
}

impl From<&AppConfig> for PhotoPolicy {
    fn from(config: &AppConfig) -> Self {
        Self {
            images_only: config.images_only,
            max_photos: config.max_photos,
        }
    }
}

/// Form state for a report being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardDraft {
    /// Text fields.
    #[serde(flatten)]
    pub details: ReportDetails,
    photos: Vec<PhotoHandle>,
}

impl WizardDraft {
    /// An empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `field`.
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::StoreName => &self.details.store_name,
            DraftField::Location => &self.details.location,
            DraftField::IssueType => &self.details.issue_type,
            DraftField::Description => &self.details.description,
            DraftField::PurchaseInfo => &self.details.purchase_info,
        }
    }

    /// Overwrite `field`.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::StoreName => &mut self.details.store_name,
            DraftField::Location => &mut self.details.location,
            DraftField::IssueType => &mut self.details.issue_type,
            DraftField::Description => &mut self.details.description,
            DraftField::PurchaseInfo => &mut self.details.purchase_info,
        };
        *slot = value.into();
    }

    /// Attached photos in order.
    pub fn photos(&self) -> &[PhotoHandle] {
        &self.photos
    }

    /// Append `handles` in input order. Duplicates are kept.
    ///
    /// The batch is checked as a whole against `policy`; if any handle is
    /// rejected nothing is appended.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Validation`] for a non-image handle when
    /// `policy.images_only` is set, or when the batch would exceed
    /// `policy.max_photos`.
    pub fn add_photos(
        &mut self,
        handles: impl IntoIterator<Item = PhotoHandle>,
        policy: &PhotoPolicy,
    ) -> Result<usize, ReportError> {
        let batch: Vec<PhotoHandle> = handles.into_iter().collect();

        if policy.images_only {
            if let Some(bad) = batch.iter().find(|h| !h.is_image()) {
                return Err(ReportError::Validation(format!(
                    "{} is not an image ({})",
                    bad.file_name, bad.content_type
                )));
            }
        }
        if let Some(max) = policy.max_photos {
            if self.photos.len() + batch.len() > max {
                return Err(ReportError::Validation(format!(
                    "at most {max} photo(s) may be attached, {} already attached",
                    self.photos.len()
                )));
            }
        }

        let added = batch.len();
        self.photos.extend(batch);
        Ok(added)
    }

    /// Remove the photo at `index`, shifting later photos down.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::IndexOutOfRange`] if `index` is past the end.
    pub fn remove_photo(&mut self, index: usize) -> Result<PhotoHandle, ReportError> {
        if index >= self.photos.len() {
            return Err(ReportError::IndexOutOfRange {
                index,
                len: self.photos.len(),
            });
        }
        Ok(self.photos.remove(index))
    }

    /// Whether nothing has been entered.
    pub fn is_empty(&self) -> bool {
        self.details.is_empty() && self.photos.is_empty()
    }

    /// Reset every field and drop all photos.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Split into the parts a report is built from.
    pub fn into_parts(self) -> (ReportDetails, Vec<PhotoHandle>) {
        (self.details, self.photos)
    }
}
