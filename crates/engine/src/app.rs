//! Application state and composition.

use std::sync::Arc;

use armoury_domain::TemplateCatalog;

use crate::infrastructure::{
    ports::{EditorPort, IdGenerator, ItemStore},
    random::SystemRandom,
    settings::Settings,
};
use crate::use_cases::{self, wargear::WargearSheet};

/// Main application state.
///
/// Holds the item store and all use cases.
pub struct App {
    pub store: Arc<dyn ItemStore>,
    pub use_cases: UseCases,
    pub settings: Settings,
}

/// Container for all use cases.
pub struct UseCases {
    pub wargear: use_cases::WargearUseCases,
    pub item_sheet: use_cases::ItemSheetUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        store: Arc<dyn ItemStore>,
        catalog: Arc<dyn TemplateCatalog + Send + Sync>,
        editor: Arc<dyn EditorPort>,
        settings: Settings,
    ) -> Self {
        let random: Arc<dyn IdGenerator> = Arc::new(SystemRandom::new());
        Self::with_random(store, catalog, editor, random, settings)
    }

    /// Create a new App with an explicit id source.
    pub fn with_random(
        store: Arc<dyn ItemStore>,
        catalog: Arc<dyn TemplateCatalog + Send + Sync>,
        editor: Arc<dyn EditorPort>,
        random: Arc<dyn IdGenerator>,
        settings: Settings,
    ) -> Self {
        let sheet = Arc::new(WargearSheet::new(
            store.clone(),
            catalog,
            settings.auto_reset_groups,
        ));
        let wargear = use_cases::WargearUseCases::new(sheet, editor, settings.summary);
        let item_sheet =
            use_cases::ItemSheetUseCases::new(store.clone(), random, wargear.attach.clone());

        Self {
            store,
            use_cases: UseCases {
                wargear,
                item_sheet,
            },
            settings,
        }
    }
}
