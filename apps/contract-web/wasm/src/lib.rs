use contract_engine::{Engine, EngineConfig};
use shared_types::{Section, SectionId};
use wasm_bindgen::prelude::*;

pub mod outline_panel;

pub use outline_panel::{OutlinePanel, VisibleEntry};

/// Parse raw text and return the `{ tree, terms, issues, placeholders }` JSON
#[wasm_bindgen]
pub fn parse_document(raw: &str) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();
    parse_to_json(raw, None).map_err(|e| JsValue::from_str(&e))
}

/// Parse with vocabularies overridden by a TOML config
#[wasm_bindgen]
pub fn parse_document_with_config(raw: &str, config_toml: &str) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();
    parse_to_json(raw, Some(config_toml)).map_err(|e| JsValue::from_str(&e))
}

/// Replace one section's text and return the new raw document.
/// The caller re-parses the result.
#[wasm_bindgen]
pub fn serialize_section(tree_json: &str, section_id: &str, content: &str) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();
    serialize_json(tree_json, section_id, content).map_err(|e| JsValue::from_str(&e))
}

/// Text of one section (a heading includes its descendants), for prompt payloads
#[wasm_bindgen]
pub fn extract_section_text(tree_json: &str, section_id: &str) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();
    extract_json(tree_json, section_id).map_err(|e| JsValue::from_str(&e))
}

fn parse_to_json(raw: &str, config_toml: Option<&str>) -> Result<String, String> {
    let engine = match config_toml {
        Some(toml) => Engine::with_config(EngineConfig::from_toml_str(toml).map_err(|e| e.to_string())?),
        None => Engine::default(),
    };
    let result = engine.parse(raw);
    serde_json::to_string(&result).map_err(|e| format!("Failed to encode result: {}", e))
}

fn tree_from_json(tree_json: &str) -> Result<Vec<Section>, String> {
    serde_json::from_str(tree_json).map_err(|e| format!("Failed to parse tree: {}", e))
}

fn serialize_json(tree_json: &str, section_id: &str, content: &str) -> Result<String, String> {
    let tree = tree_from_json(tree_json)?;
    contract_engine::serialize(&tree, &SectionId::from(section_id), content).map_err(|e| e.to_string())
}

fn extract_json(tree_json: &str, section_id: &str) -> Result<String, String> {
    let tree = tree_from_json(tree_json)?;
    contract_engine::extract_section(&tree, &SectionId::from(section_id)).map_err(|e| e.to_string())
}
