//! Rename wargear use case.

use std::sync::Arc;

use armoury_domain::ItemId;

use super::error::SheetError;
use super::sheet::WargearSheet;

/// Sets a slot's name override without opening its editor.
pub struct RenameWargear {
    sheet: Arc<WargearSheet>,
}

impl RenameWargear {
    pub fn new(sheet: Arc<WargearSheet>) -> Self {
        Self { sheet }
    }

    pub async fn execute(
        &self,
        archetype_id: &ItemId,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), SheetError> {
        let name = name.into();
        let mut archetype = self.sheet.load(archetype_id).await?;
        archetype.rename(index, name.as_str(), self.sheet.catalog())?;
        self.sheet.save_wargear(&archetype).await?;

        tracing::debug!(archetype_id = %archetype_id, index, name = %name, "Renamed wargear");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockItemStore;
    use crate::use_cases::wargear::sheet::test_support::*;
    use armoury_domain::{Archetype, GROUPS_PATH, WARGEAR_PATH};
    use serde_json::json;

    #[tokio::test]
    async fn rename_writes_name_override_only() {
        let mut owner = Archetype::from_item(&archetype("A1")).unwrap();
        owner.attach(&weapon("T1", "Lasgun"));
        let item = archetype("A1")
            .with_changes(&owner.wargear_changes().unwrap())
            .unwrap();

        let mut store = MockItemStore::new();
        store
            .expect_get()
            .returning(move |_| Ok(Some(item.clone())));
        store
            .expect_update()
            .withf(|_, changes| {
                let slot = &changes[WARGEAR_PATH][0];
                !changes.contains_key(GROUPS_PATH)
                    && slot["name"] == json!("Lucius Lasgun")
                    && slot["diff"]["name"]["value"] == json!("Lucius Lasgun")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let sheet = Arc::new(WargearSheet::new(
            Arc::new(store),
            Arc::new(catalog(&[weapon("T1", "Lasgun")])),
            true,
        ));

        RenameWargear::new(sheet)
            .execute(&ItemId::new("A1"), 0, "Lucius Lasgun")
            .await
            .unwrap();
    }
}
