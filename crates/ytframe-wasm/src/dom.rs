//! DOM Host - `ScriptHost` over the real browser document

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlScriptElement, Node, Window};
use ytframe_core::{Error, Result, ScriptHost};

/// Convert a thrown JS value into a core error
pub(crate) fn js_error(value: JsValue) -> Error {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    Error::Js(message)
}

/// Current page window and document
pub struct DomHost {
    window: Window,
    document: Document,
}

impl DomHost {
    /// Bind to the global `window`
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let document = window.document().ok_or(Error::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Read a property of the global object; `undefined` if missing
    pub fn global(&self, name: &str) -> JsValue {
        Reflect::get(&self.window, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED)
    }

    /// Set a property of the global object
    pub fn set_global(&self, name: &str, value: &JsValue) -> Result<()> {
        let set = Reflect::set(&self.window, &JsValue::from_str(name), value).map_err(js_error)?;
        if set {
            Ok(())
        } else {
            Err(Error::HookInstall { name: name.to_string() })
        }
    }
}

impl ScriptHost for DomHost {
    type Element = Element;

    fn has_global(&self, name: &str) -> bool {
        !self.global(name).is_undefined()
    }

    fn create_script(&self, src: &str) -> Result<Element> {
        let script: HtmlScriptElement = self
            .document
            .create_element("script")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| Error::dom("created element is not a <script>"))?;
        script.set_src(src);
        Ok(script.into())
    }

    fn first_script(&self) -> Option<Element> {
        self.document.get_elements_by_tag_name("script").item(0)
    }

    fn insert_before(&self, node: &Element, reference: &Element) -> Result<()> {
        let parent = reference
            .parent_node()
            .ok_or_else(|| Error::dom("first <script> has no parent"))?;
        let reference: &Node = reference;
        parent.insert_before(node, Some(reference)).map_err(js_error)?;
        Ok(())
    }

    fn append_to_body(&self, node: &Element) -> Result<()> {
        let body = self.document.body().ok_or(Error::NoBody)?;
        body.append_child(node).map_err(js_error)?;
        Ok(())
    }

    /// The bootstrap marks `YT.loaded = 1` after calling the ready hook
    fn api_loaded(&self, api_global: &str) -> bool {
        let api = self.global(api_global);
        if api.is_undefined() || api.is_null() {
            return false;
        }
        Reflect::get(&api, &JsValue::from_str("loaded"))
            .ok()
            .and_then(|loaded| loaded.as_f64())
            .is_some_and(|loaded| loaded == 1.0)
    }
}
