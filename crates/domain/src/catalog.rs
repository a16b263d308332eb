//! Read-only access to the template catalog.

use std::collections::HashMap;

use crate::entities::TemplateItem;
use crate::ids::ItemId;

/// Resolves template items by id.
///
/// Injected wherever a projection needs the template behind a slot, so the
/// domain never reaches for a global item collection.
pub trait TemplateCatalog {
    fn resolve(&self, id: &ItemId) -> Option<TemplateItem>;
}

impl TemplateCatalog for HashMap<ItemId, TemplateItem> {
    fn resolve(&self, id: &ItemId) -> Option<TemplateItem> {
        self.get(id).cloned()
    }
}

impl<C: TemplateCatalog + ?Sized> TemplateCatalog for &C {
    fn resolve(&self, id: &ItemId) -> Option<TemplateItem> {
        (**self).resolve(id)
    }
}
