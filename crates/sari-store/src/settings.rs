//! # Business Settings
//!
//! Singleton store configuration. Reads fall back to the built-in
//! defaults until the first save; updates merge field-by-field.

use std::sync::Arc;

use sari_core::{BusinessSettings, SettingsUpdate};
use tracing::info;

use crate::error::StoreResult;
use crate::kv::{keys, load_or, save, KvStore};

pub struct SettingsStore {
    kv: Arc<dyn KvStore>,
    settings: BusinessSettings,
}

impl SettingsStore {
    pub fn load(kv: Arc<dyn KvStore>) -> StoreResult<Self> {
        let settings = load_or(kv.as_ref(), keys::SETTINGS, BusinessSettings::default)?;
        Ok(SettingsStore { kv, settings })
    }

    pub fn settings(&self) -> &BusinessSettings {
        &self.settings
    }

    /// Merges the provided fields into the settings and persists.
    pub fn update(&mut self, update: SettingsUpdate) -> StoreResult<&BusinessSettings> {
        if let Some(business_name) = update.business_name {
            self.settings.business_name = business_name;
        }
        if let Some(address) = update.address {
            self.settings.address = address;
        }
        if let Some(tin) = update.tin {
            self.settings.tin = tin;
        }
        if let Some(bir_permit_number) = update.bir_permit_number {
            self.settings.bir_permit_number = bir_permit_number;
        }
        if let Some(contact_number) = update.contact_number {
            self.settings.contact_number = contact_number;
        }
        if let Some(email) = update.email {
            self.settings.email = email;
        }
        if let Some(receipt_footer) = update.receipt_footer {
            self.settings.receipt_footer = receipt_footer;
        }
        if let Some(vat_enabled) = update.vat_enabled {
            self.settings.vat_enabled = vat_enabled;
        }
        if let Some(vat_rate) = update.vat_rate {
            self.settings.vat_rate = vat_rate;
        }

        save(self.kv.as_ref(), keys::SETTINGS, &self.settings)?;
        info!(business = %self.settings.business_name, "Settings updated");
        Ok(&self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[test]
    fn test_defaults_until_first_save() {
        let s = SettingsStore::load(Arc::new(MemoryStore::new())).unwrap();
        assert_eq!(s.settings().business_name, "Sari-Sari Store POS");
        assert!(s.settings().vat_enabled);
        assert_eq!(s.settings().vat_rate.bps(), 1200);
    }

    #[test]
    fn test_update_merges_and_persists() {
        let kv = Arc::new(MemoryStore::new());
        let mut s = SettingsStore::load(kv.clone()).unwrap();
        s.update(SettingsUpdate {
            business_name: Some("Tindahan ni Aling Nena".to_string()),
            ..Default::default()
        })
        .unwrap();

        let reloaded = SettingsStore::load(kv).unwrap();
        assert_eq!(reloaded.settings().business_name, "Tindahan ni Aling Nena");
        // Untouched fields keep their defaults.
        assert_eq!(reloaded.settings().tin, "123-456-789-000");
    }
}
