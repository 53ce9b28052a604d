//! WebAssembly bindings for the DFA matcher

use std::sync::OnceLock;
use wasm_bindgen::prelude::*;
use dfa_compiler::{compile_definition, to_json};
use dfa_core::{ab_star_c, Matcher, TransitionTable};

static TABLE: OnceLock<TransitionTable> = OnceLock::new();

/// Install the table used by `matches` and `filter`.
#[wasm_bindgen]
pub fn init(definition: &str) -> Result<(), JsValue> {
    if TABLE.get().is_some() {
        return Err(JsValue::from_str("Already initialized. Reload the page to reinitialize."));
    }

    let (table, stats) = compile_definition(definition)
        .map_err(|e| JsValue::from_str(&format!("Failed to compile table: {}", e)))?;

    for state in &stats.unreachable {
        web_sys::console::warn_1(&JsValue::from_str(&format!("unreachable state '{}'", state)));
    }

    TABLE.set(table)
        .map_err(|_| JsValue::from_str("Failed to set matcher table"))?;

    Ok(())
}

#[wasm_bindgen]
pub fn is_initialized() -> bool {
    TABLE.get().is_some()
}

/// Whether `input` is accepted. Falls back to the built-in `ab*c` table before `init`.
#[wasm_bindgen]
pub fn matches(input: &str) -> bool {
    matcher().evaluate(input)
}

/// Keep the accepted strings of a JS array; non-string entries are skipped.
#[wasm_bindgen]
pub fn filter(candidates: JsValue) -> js_sys::Array {
    let matcher = matcher();
    let result = js_sys::Array::new();
    for value in js_sys::Array::from(&candidates).iter() {
        if let Some(candidate) = value.as_string() {
            if matcher.evaluate(&candidate) {
                result.push(&value);
            }
        }
    }
    result
}

/// Compile a definition into the JSON table format without installing it.
#[wasm_bindgen]
pub fn compile_table(definition: &str) -> Result<String, JsValue> {
    let (table, _) = compile_definition(definition)
        .map_err(|e| JsValue::from_str(&format!("Failed to compile table: {}", e)))?;
    to_json(&table).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn get_table_info() -> JsValue {
    let table = TABLE.get().unwrap_or_else(ab_star_c);
    let result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&result, &"initialized".into(), &JsValue::from(is_initialized()));
    let _ = js_sys::Reflect::set(&result, &"states".into(), &JsValue::from(table.state_count() as u32));
    let _ = js_sys::Reflect::set(&result, &"transitions".into(), &JsValue::from(table.transition_count() as u32));
    result.into()
}

fn matcher() -> Matcher<'static> {
    Matcher::new(TABLE.get().unwrap_or_else(ab_star_c))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    const AB_STAR_C: &str = include_str!("../../../tables/ab_star_c.dfa");

    fn info_number(info: &JsValue, key: &str) -> Option<f64> {
        js_sys::Reflect::get(info, &key.into()).ok()?.as_f64()
    }

    #[wasm_bindgen_test]
    fn init_refuses_second_table() {
        // Other tests may have installed the same table already.
        let _ = init(AB_STAR_C);
        assert!(is_initialized());

        let err = init(AB_STAR_C).unwrap_err();
        assert!(err.as_string().unwrap().contains("Already initialized"));
        assert!(matches("abbbc"));
        assert!(!matches("abd"));
    }

    #[wasm_bindgen_test]
    fn filter_skips_non_strings() {
        let candidates = js_sys::Array::new();
        candidates.push(&JsValue::from_str("abc"));
        candidates.push(&JsValue::from(42));
        candidates.push(&JsValue::from_str("abd"));
        candidates.push(&JsValue::NULL);
        candidates.push(&JsValue::from_str("ac"));

        let kept = filter(candidates.into());
        assert_eq!(kept.length(), 2);
        assert_eq!(kept.get(0).as_string().as_deref(), Some("abc"));
        assert_eq!(kept.get(1).as_string().as_deref(), Some("ac"));
    }

    #[wasm_bindgen_test]
    fn table_info_reports_counts() {
        let info = get_table_info();
        assert_eq!(info_number(&info, "states"), Some(4.0));
        assert_eq!(info_number(&info, "transitions"), Some(5.0));
        let initialized = js_sys::Reflect::get(&info, &"initialized".into()).unwrap();
        assert_eq!(initialized.as_bool(), Some(is_initialized()));
    }

    #[wasm_bindgen_test]
    fn compile_table_reports_errors() {
        let err = compile_table("start A\nA x B\nA x C\n").unwrap_err();
        assert!(err.as_string().unwrap().contains("Failed to compile table"));
    }
}
