//! Bootstrap injector
//!
//! Adds the IFrame API `<script>` tag to the page unless the `YT` global is
//! already present. Placement follows the snippet YouTube publishes: before
//! the first existing script, or at the end of `<body>` when the page has
//! no scripts.
//!
//! The DOM is reached through [`ScriptHost`] so the placement rule does not
//! depend on a browser.
//!
//! [`Bootstrap`] is the page-wide state: one readiness gate and at most one
//! injection, however many call sites start loading.

use std::cell::Cell;
use std::rc::Rc;

use crate::{
    config::LoaderConfig,
    gate::{Callback, ReadinessGate, Waiter},
    Result,
};
use tracing::{debug, info};

/// The slice of the host document the injector needs
pub trait ScriptHost {
    /// Element handle type
    type Element;

    /// Does the global `name` already exist
    fn has_global(&self, name: &str) -> bool;

    /// Create a detached `<script>` element with the given `src`
    fn create_script(&self, src: &str) -> Result<Self::Element>;

    /// First `<script>` element in document order
    fn first_script(&self) -> Option<Self::Element>;

    /// Insert `node` immediately before `reference`, under `reference`'s parent
    fn insert_before(&self, node: &Self::Element, reference: &Self::Element) -> Result<()>;

    /// Append `node` as the last child of `<body>`
    fn append_to_body(&self, node: &Self::Element) -> Result<()>;

    /// Has the API behind `api_global` finished loading already
    fn api_loaded(&self, _api_global: &str) -> bool {
        false
    }
}

/// What `inject_bootstrap` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    /// The API global existed; the document was not touched
    AlreadyPresent,
    /// The tag went in before the first existing script
    InsertedBeforeScript,
    /// The page had no scripts; the tag was appended to `<body>`
    AppendedToBody,
}

impl Injection {
    /// True if a script tag was added
    pub fn mutated(&self) -> bool {
        !matches!(self, Injection::AlreadyPresent)
    }
}

impl std::fmt::Display for Injection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Injection::AlreadyPresent => write!(f, "already present"),
            Injection::InsertedBeforeScript => write!(f, "inserted before first script"),
            Injection::AppendedToBody => write!(f, "appended to body"),
        }
    }
}

/// Inject the bootstrap script unless the API global already exists
pub fn inject_bootstrap<H: ScriptHost>(host: &H, config: &LoaderConfig) -> Result<Injection> {
    if host.has_global(&config.api_global) {
        debug!(global = %config.api_global, "API global present, skipping injection");
        return Ok(Injection::AlreadyPresent);
    }

    let tag = host.create_script(&config.script_url)?;

    let injection = match host.first_script() {
        Some(first) => {
            host.insert_before(&tag, &first)?;
            Injection::InsertedBeforeScript
        }
        None => {
            host.append_to_body(&tag)?;
            Injection::AppendedToBody
        }
    };

    info!(src = %config.script_url, placement = %injection, "IFrame API script injected");
    Ok(injection)
}

/// One gate and one injection per page
pub struct Bootstrap<W: Waiter = Callback> {
    gate: Rc<ReadinessGate<W>>,
    injection: Cell<Option<Injection>>,
}

impl<W: Waiter> Bootstrap<W> {
    pub fn new() -> Self {
        Self {
            gate: ReadinessGate::shared(),
            injection: Cell::new(None),
        }
    }

    /// Shared handle to the page gate
    pub fn gate(&self) -> Rc<ReadinessGate<W>> {
        Rc::clone(&self.gate)
    }

    /// Outcome of the first successful `load`
    pub fn injection(&self) -> Option<Injection> {
        self.injection.get()
    }

    /// Inject the bootstrap script once per page.
    ///
    /// Later calls return the first outcome without touching the document.
    /// If the API has already finished loading, its hook call was missed, so
    /// the gate is opened here.
    pub fn load<H: ScriptHost>(&self, host: &H, config: &LoaderConfig) -> Result<Injection> {
        let injection = match self.injection.get() {
            Some(injection) => {
                debug!(placement = %injection, "Bootstrap already loaded on this page");
                injection
            }
            None => {
                let injection = inject_bootstrap(host, config)?;
                self.injection.set(Some(injection));
                injection
            }
        };

        if !self.gate.is_ready() && host.api_loaded(&config.api_global) {
            info!("IFrame API already loaded, opening gate");
            self.gate.on_external_ready();
        }
        Ok(injection)
    }
}

impl<W: Waiter> Default for Bootstrap<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Waiter> std::fmt::Debug for Bootstrap<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap")
            .field("gate", &self.gate)
            .field("injection", &self.injection.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::cell::RefCell;

    /// Flat list of script srcs in document order, plus a body flag
    struct FlatDom {
        globals: Vec<&'static str>,
        scripts: RefCell<Vec<String>>,
        has_body: bool,
        loaded: bool,
    }

    impl ScriptHost for FlatDom {
        type Element = String;

        fn has_global(&self, name: &str) -> bool {
            self.globals.iter().any(|g| *g == name)
        }

        fn api_loaded(&self, api_global: &str) -> bool {
            self.loaded && self.has_global(api_global)
        }

        fn create_script(&self, src: &str) -> Result<String> {
            Ok(src.to_string())
        }

        fn first_script(&self) -> Option<String> {
            self.scripts.borrow().first().cloned()
        }

        fn insert_before(&self, node: &String, reference: &String) -> Result<()> {
            let mut scripts = self.scripts.borrow_mut();
            let at = scripts
                .iter()
                .position(|s| s == reference)
                .ok_or_else(|| Error::dom("reference not in document"))?;
            scripts.insert(at, node.clone());
            Ok(())
        }

        fn append_to_body(&self, node: &String) -> Result<()> {
            if !self.has_body {
                return Err(Error::NoBody);
            }
            self.scripts.borrow_mut().push(node.clone());
            Ok(())
        }
    }

    #[test]
    fn test_skips_when_global_present() {
        let dom = FlatDom {
            globals: vec!["YT"],
            scripts: RefCell::new(vec!["app.js".into()]),
            has_body: true,
            loaded: false,
        };
        let outcome = inject_bootstrap(&dom, &LoaderConfig::default()).unwrap();
        assert_eq!(outcome, Injection::AlreadyPresent);
        assert!(!outcome.mutated());
        assert_eq!(*dom.scripts.borrow(), vec!["app.js".to_string()]);
    }

    #[test]
    fn test_inserts_before_first_script() {
        let dom = FlatDom {
            globals: vec![],
            scripts: RefCell::new(vec!["a.js".into(), "b.js".into()]),
            has_body: true,
            loaded: false,
        };
        let outcome = inject_bootstrap(&dom, &LoaderConfig::default()).unwrap();
        assert_eq!(outcome, Injection::InsertedBeforeScript);
        assert_eq!(
            *dom.scripts.borrow(),
            vec![
                "https://www.youtube.com/iframe_api".to_string(),
                "a.js".to_string(),
                "b.js".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_body_is_an_error() {
        let dom = FlatDom {
            globals: vec![],
            scripts: RefCell::new(vec![]),
            has_body: false,
            loaded: false,
        };
        let err = inject_bootstrap(&dom, &LoaderConfig::default()).unwrap_err();
        assert!(err.is_environment());
        assert_eq!(err.error_code(), "NO_BODY");
    }

    #[test]
    fn test_bootstrap_injects_once_per_page() {
        let dom = FlatDom {
            globals: vec![],
            scripts: RefCell::new(vec!["app.js".into()]),
            has_body: true,
            loaded: false,
        };
        let page: Bootstrap = Bootstrap::new();

        let first = page.load(&dom, &LoaderConfig::default()).unwrap();
        let second = page.load(&dom, &LoaderConfig::default()).unwrap();

        assert_eq!(first, Injection::InsertedBeforeScript);
        assert_eq!(second, first);
        assert_eq!(page.injection(), Some(first));
        assert_eq!(dom.scripts.borrow().len(), 2);
        assert!(!page.gate().is_ready());
    }

    #[test]
    fn test_bootstrap_handles_share_one_gate() {
        let dom = FlatDom {
            globals: vec![],
            scripts: RefCell::new(vec![]),
            has_body: true,
            loaded: false,
        };
        let page: Bootstrap = Bootstrap::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second"] {
            page.load(&dom, &LoaderConfig::default()).unwrap();
            let log = Rc::clone(&log);
            page.gate().register_on_ready(Box::new(move || log.borrow_mut().push(name)));
        }

        assert_eq!(page.gate().pending(), 2);
        assert_eq!(page.gate().on_external_ready(), 2);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_bootstrap_opens_gate_when_api_already_loaded() {
        let dom = FlatDom {
            globals: vec!["YT"],
            scripts: RefCell::new(vec![]),
            has_body: true,
            loaded: true,
        };
        let page: Bootstrap = Bootstrap::new();

        assert_eq!(page.load(&dom, &LoaderConfig::default()).unwrap(), Injection::AlreadyPresent);
        assert!(page.gate().is_ready());
        assert!(dom.scripts.borrow().is_empty());
    }

    #[test]
    fn test_failed_load_can_be_retried() {
        let mut dom = FlatDom {
            globals: vec![],
            scripts: RefCell::new(vec![]),
            has_body: false,
            loaded: false,
        };
        let page: Bootstrap = Bootstrap::new();

        assert!(page.load(&dom, &LoaderConfig::default()).is_err());
        assert_eq!(page.injection(), None);

        dom.has_body = true;
        assert_eq!(page.load(&dom, &LoaderConfig::default()).unwrap(), Injection::AppendedToBody);
    }
}
