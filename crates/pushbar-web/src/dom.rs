#![forbid(unsafe_code)]

//! [`PanelHost`] over the live DOM.
//!
//! Only compiled on `wasm32` targets.

use js_sys::{Object, Reflect};
use pushbar_core::markers::{
    self, ACTIVE_ATTR, BLUR_CLASS, LOCKED_CLASS, OVERLAY_CLASS, TRIGGER_OPEN_CLASS,
};
use pushbar_core::{PanelEvent, PanelHost, PanelId, PanelMarkers, RootProjection, TriggerKind};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Document, Element};

/// Page host backed by a `web_sys::Document`.
pub struct DomHost {
    document: Document,
    root: Element,
    overlay: Option<Element>,
}

impl DomHost {
    /// Wrap `document`. Returns `None` when it has no root element.
    pub fn new(document: Document) -> Option<Self> {
        let root = document.document_element()?;
        Some(Self {
            document,
            root,
            overlay: None,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The overlay element, once mounted.
    pub fn overlay(&self) -> Option<&Element> {
        self.overlay.as_ref()
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                warn!(selector, error = ?err, "pushbar selector rejected");
                None
            }
        }
    }
}

impl PanelHost for DomHost {
    type Panel = Element;
    type Trigger = Element;

    fn find_panel(&self, id: &PanelId) -> Option<Element> {
        self.query(&markers::panel_selector(id.as_str()))
    }

    fn panel_markers(&self, panel: &Element) -> PanelMarkers {
        let classes = panel.class_list();
        PanelMarkers::from_classes(|class| classes.contains(class))
    }

    fn insert_panel_markers(&mut self, panel: &Element, markers: PanelMarkers) {
        let classes = panel.class_list();
        for class in markers.class_names() {
            let _ = classes.add_1(class);
        }
    }

    fn remove_panel_markers(&mut self, panel: &Element, markers: PanelMarkers) {
        let classes = panel.class_list();
        for class in markers.class_names() {
            let _ = classes.remove_1(class);
        }
    }

    fn emit(&mut self, event: PanelEvent<'_, Element>) {
        let detail = Object::new();
        let _ = Reflect::set(&detail, &JsValue::from_str("pushbar"), event.panel);

        let init = CustomEventInit::new();
        init.set_bubbles(event.bubbles());
        init.set_detail(&detail);

        match CustomEvent::new_with_event_init_dict(event.kind.event_name(), &init) {
            Ok(custom) => {
                let _ = event.panel.dispatch_event(&custom);
            }
            Err(err) => warn!(error = ?err, "pushbar notification not created"),
        }
    }

    fn project_root(&mut self, root: RootProjection<'_>) {
        let classes = self.root.class_list();
        let _ = if root.locked {
            classes.add_1(LOCKED_CLASS)
        } else {
            classes.remove_1(LOCKED_CLASS)
        };
        let _ = match root.active {
            Some(id) => self.root.set_attribute(ACTIVE_ATTR, id.as_str()),
            None => self.root.remove_attribute(ACTIVE_ATTR),
        };
    }

    fn scan_triggers(&self, kind: TriggerKind) -> Vec<(Element, Option<String>)> {
        let attr = kind.attribute();
        let nodes = match self
            .document
            .query_selector_all(&markers::presence_selector(attr))
        {
            Ok(nodes) => nodes,
            Err(err) => {
                warn!(attr, error = ?err, "pushbar trigger scan failed");
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|idx| nodes.item(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| {
                let value = el.get_attribute(attr);
                (el, value)
            })
            .collect()
    }

    fn set_trigger_open(&mut self, trigger: &Element, open: bool) {
        let classes = trigger.class_list();
        let _ = if open {
            classes.add_1(TRIGGER_OPEN_CLASS)
        } else {
            classes.remove_1(TRIGGER_OPEN_CLASS)
        };
    }

    fn mount_overlay(&mut self) {
        let Some(body) = self.document.body() else {
            warn!("pushbar overlay skipped: document has no body");
            return;
        };
        let overlay = match self.document.create_element("div") {
            Ok(el) => el,
            Err(err) => {
                warn!(error = ?err, "pushbar overlay not created");
                return;
            }
        };
        let _ = overlay.class_list().add_1(OVERLAY_CLASS);
        if let Err(err) = body.append_child(&overlay) {
            warn!(error = ?err, "pushbar overlay not attached");
            return;
        }
        self.overlay = Some(overlay);
    }

    fn blur_main_content(&mut self) -> bool {
        match self.query(&markers::main_content_selector()) {
            Some(main) => {
                let _ = main.class_list().add_1(BLUR_CLASS);
                true
            }
            None => false,
        }
    }
}
