use contract_engine::{EngineResult, FoldState, Outline, OutlineEntry, ParseResult};
use serde::{Deserialize, Serialize};
use shared_types::{Section, SectionId};
use wasm_bindgen::prelude::*;

/// An outline row as the navigation sidebar renders it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleEntry {
    #[serde(flatten)]
    pub entry: OutlineEntry,
    pub is_collapsed: bool,
    pub is_active: bool,
}

/// Navigation state for the document sidebar. The fold state outlives each
/// parse; only ids that disappear from the new tree are dropped.
#[wasm_bindgen]
#[derive(Default)]
pub struct OutlinePanel {
    tree: Vec<Section>,
    outline: Outline,
    folds: FoldState,
    active_id: Option<SectionId>,
}

impl OutlinePanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a fresh parse result, keeping folds for sections that still exist.
    pub fn load_result(&mut self, result: &ParseResult) {
        self.tree = result.tree.clone();
        self.outline = result.outline();
        self.folds.retain_known(&self.tree);

        if let Some(active) = &self.active_id {
            if contract_engine::tree::find(&self.tree, active).is_none() {
                self.active_id = None;
            }
        }
    }

    pub fn load(&mut self, raw: &str) {
        self.load_result(&contract_engine::parse(raw));
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn folds(&self) -> &FoldState {
        &self.folds
    }

    pub fn toggle(&mut self, id: &SectionId) -> bool {
        self.folds.toggle(id)
    }

    /// Make `id` active, unfolding whatever hides it.
    pub fn scroll_to(&mut self, id: &SectionId) -> EngineResult<Vec<SectionId>> {
        let expanded = self.folds.scroll_to(&self.tree, id)?;
        self.active_id = Some(id.clone());
        Ok(expanded)
    }

    pub fn visible(&self) -> Vec<VisibleEntry> {
        self.folds
            .visible(&self.outline)
            .into_iter()
            .map(|entry| VisibleEntry {
                entry: entry.clone(),
                is_collapsed: self.folds.is_collapsed(&entry.id),
                is_active: self.active_id.as_ref() == Some(&entry.id),
            })
            .collect()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.visible()).unwrap_or_default()
    }
}

// WASM bindings
#[wasm_bindgen]
impl OutlinePanel {
    #[wasm_bindgen(constructor)]
    pub fn new_wasm() -> Self {
        Self::new()
    }

    #[wasm_bindgen(js_name = load)]
    pub fn load_wasm(&mut self, raw: &str) {
        self.load(raw);
    }

    #[wasm_bindgen(js_name = toggle)]
    pub fn toggle_wasm(&mut self, id: &str) -> bool {
        self.toggle(&SectionId::from(id))
    }

    /// Returns the JSON list of ids that had to be expanded
    #[wasm_bindgen(js_name = scrollTo)]
    pub fn scroll_to_wasm(&mut self, id: &str) -> Result<String, JsValue> {
        let expanded = self
            .scroll_to(&SectionId::from(id))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_json::to_string(&expanded).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = getVisibleJson)]
    pub fn visible_json(&self) -> String {
        self.to_json()
    }

    #[wasm_bindgen(js_name = getActiveId)]
    pub fn active_id(&self) -> Option<String> {
        self.active_id.as_ref().map(|id| id.to_string())
    }

    #[wasm_bindgen(js_name = collapseAll)]
    pub fn collapse_all(&mut self) {
        self.folds.collapse_all(&self.outline);
    }

    #[wasm_bindgen(js_name = expandAll)]
    pub fn expand_all(&mut self) {
        self.folds.expand_all();
    }

    /// Fold state as a JSON id list, for the host page to persist
    #[wasm_bindgen(js_name = getFoldStateJson)]
    pub fn fold_state_json(&self) -> String {
        serde_json::to_string(&self.folds).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = setFoldStateJson)]
    pub fn set_fold_state_json(&mut self, json: &str) -> Result<(), JsValue> {
        let folds: FoldState = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse fold state: {}", e)))?;
        self.folds = folds;
        Ok(())
    }
}
