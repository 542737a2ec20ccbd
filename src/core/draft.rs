use crate::models::vocabulary::parse_slot;
use crate::models::{BookingDraft, SlotCodeError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur while moving the booking draft between states
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Invalid slot: {0}")]
    InvalidSlot(#[from] SlotCodeError),

    #[error("No active booking draft")]
    NoActiveDraft,

    #[error("Draft storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Draft serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Lifecycle of the booking draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftState {
    Empty,
    DaySelected(BookingDraft),
    Contacted(BookingDraft),
}

impl From<Option<BookingDraft>> for DraftState {
    fn from(draft: Option<BookingDraft>) -> Self {
        match draft {
            None => DraftState::Empty,
            Some(draft) if draft.is_contacted() => DraftState::Contacted(draft),
            Some(draft) => DraftState::DaySelected(draft),
        }
    }
}

/// File-backed store for the single process-wide booking draft
///
/// There is exactly one draft: every slot selection replaces it, whoever
/// made it. Each transition is a read-modify-write of the backing file done
/// while holding `lock`, so concurrent requests serialize instead of
/// interleaving their reads and writes.
pub struct DraftStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl DraftStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current state of the draft
    pub async fn current(&self) -> Result<DraftState, DraftError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.into())
    }

    /// Record a slot selection, replacing any existing draft
    ///
    /// The tutor id is only logged; the draft does not remember which tutor
    /// the slot belongs to.
    pub async fn select_slot(
        &self,
        tutor_id: u32,
        day: &str,
        time: &str,
    ) -> Result<BookingDraft, DraftError> {
        let (day, time) = parse_slot(day, time)?;
        let draft = BookingDraft::new(day, time);

        let _guard = self.lock.lock().await;
        self.write(&draft).await?;

        tracing::info!("Slot selected: tutor {} on {} at {}", tutor_id, day, time);

        Ok(draft)
    }

    /// Attach contact details to the current draft
    pub async fn attach_contact(&self, name: &str, phone: &str) -> Result<BookingDraft, DraftError> {
        let _guard = self.lock.lock().await;

        let mut draft = self.read().await?.ok_or(DraftError::NoActiveDraft)?;
        draft.name = Some(name.to_string());
        draft.phone = Some(phone.to_string());

        self.write(&draft).await?;

        tracing::info!("Contact attached to draft for {} at {}", draft.day, draft.time);

        Ok(draft)
    }

    async fn read(&self) -> Result<Option<BookingDraft>, DraftError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, draft: &BookingDraft) -> Result<(), DraftError> {
        let json = serde_json::to_vec_pretty(draft)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Replace the file in one step so a crash never leaves half a draft
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        tracing::debug!("Draft written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeSlot, Weekday};
    use tempfile::TempDir;

    fn create_store(dir: &TempDir) -> DraftStore {
        DraftStore::new(dir.path().join("request.json"))
    }

    #[tokio::test]
    async fn test_contact_before_selection_rejected() {
        let dir = TempDir::new().unwrap();
        let store = create_store(&dir);

        let err = store.attach_contact("Anna", "555-0100").await.unwrap_err();

        assert!(matches!(err, DraftError::NoActiveDraft));
        assert_eq!(store.current().await.unwrap(), DraftState::Empty);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_select_then_contact() {
        let dir = TempDir::new().unwrap();
        let store = create_store(&dir);

        let selected = store.select_slot(1, "mon", "8").await.unwrap();
        assert!(matches!(store.current().await.unwrap(), DraftState::DaySelected(_)));

        let contacted = store.attach_contact("Anna", "555-0100").await.unwrap();

        assert_eq!(contacted.day, selected.day);
        assert_eq!(
            contacted,
            BookingDraft {
                day: Weekday::Mon,
                time: "8".parse::<TimeSlot>().unwrap(),
                name: Some("Anna".to_string()),
                phone: Some("555-0100".to_string()),
            }
        );
        assert_eq!(store.current().await.unwrap(), DraftState::Contacted(contacted));
    }

    #[tokio::test]
    async fn test_repeat_contact_overwrites_details() {
        let dir = TempDir::new().unwrap();
        let store = create_store(&dir);

        store.select_slot(1, "wed", "14").await.unwrap();
        store.attach_contact("Anna", "555-0100").await.unwrap();
        let draft = store.attach_contact("Boris", "555-0199").await.unwrap();

        assert_eq!(draft.day, Weekday::Wed);
        assert_eq!(draft.time.hour(), 14);
        assert_eq!(draft.name.as_deref(), Some("Boris"));
        assert_eq!(draft.phone.as_deref(), Some("555-0199"));
    }

    #[tokio::test]
    async fn test_invalid_slot_leaves_draft_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = create_store(&dir);

        let before = store.select_slot(1, "tue", "10").await.unwrap();

        let err = store.select_slot(1, "xx", "8").await.unwrap_err();
        assert!(matches!(err, DraftError::InvalidSlot(SlotCodeError::UnknownDay(_))));

        let err = store.select_slot(1, "mon", "25").await.unwrap_err();
        assert!(matches!(err, DraftError::InvalidSlot(SlotCodeError::UnknownTime(_))));

        assert_eq!(store.current().await.unwrap(), DraftState::DaySelected(before));
    }

    #[tokio::test]
    async fn test_corrupt_draft_file_reported() {
        let dir = TempDir::new().unwrap();
        let store = create_store(&dir);
        std::fs::write(store.path(), b"{\"day\": ").unwrap();

        let err = store.attach_contact("Anna", "555-0100").await.unwrap_err();

        assert!(matches!(err, DraftError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_failed_replace_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = create_store(&dir);
        // A non-empty directory at the draft path makes the rename fail
        std::fs::create_dir(store.path()).unwrap();
        std::fs::write(store.path().join("keep"), b"").unwrap();

        let err = store.select_slot(1, "mon", "8").await.unwrap_err();

        assert!(matches!(err, DraftError::Io(_)));
        assert!(!store.path().with_extension("tmp").exists());
    }
}
