//! YouTube Loader - wires the page-wide readiness gate to the browser
//!
//! A page has exactly one bootstrap: one `window.onYouTubeIframeAPIReady`
//! hook, one gate behind it and at most one injected `<script>`. Every
//! `YouTubeLoader` is a handle onto that state, so loaders started from
//! different call sites share their waiters.
//!
//! Start-up:
//! 1. the first loader publishes the hook, a trampoline into the gate
//! 2. the bootstrap `<script>` is injected unless `YT` already exists
//! 3. an optional timer warns if the hook has not fired in time

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use ytframe_core::{
    Bootstrap, Injection, LoaderConfig, ReadinessGate, Registration, Result, Waiter, WaiterId,
};

use crate::dom::{js_error, DomHost};

/// A ready callback from either side of the boundary
pub enum ReadyCallback {
    /// Function passed in from JavaScript
    Js(Function),
    /// Rust closure
    Rust(Box<dyn FnOnce()>),
}

impl ReadyCallback {
    /// Is this the given JS function (`===`)
    pub fn is_function(&self, target: &Function) -> bool {
        match self {
            ReadyCallback::Js(f) => js_sys::Object::is(f, target),
            ReadyCallback::Rust(_) => false,
        }
    }

    /// Same callback for de-duplication: identical JS functions only.
    /// Rust closures are never considered equal.
    pub fn same(a: &ReadyCallback, b: &ReadyCallback) -> bool {
        match b {
            ReadyCallback::Js(f) => a.is_function(f),
            ReadyCallback::Rust(_) => false,
        }
    }
}

impl Waiter for ReadyCallback {
    fn notify(self) {
        match self {
            ReadyCallback::Js(f) => {
                // A throwing waiter must not stop the rest of the drain.
                if let Err(err) = f.call0(&JsValue::NULL) {
                    error!(error = ?err, "Ready callback threw");
                }
            }
            ReadyCallback::Rust(f) => f(),
        }
    }
}

/// Gate type shared by the loader and its callers
pub type Gate = ReadinessGate<ReadyCallback>;

/// Queue a JS callback unless the same function is already pending
pub fn register_js(gate: &Gate, callback: Function) -> Registration {
    gate.register_unique_on_ready(ReadyCallback::Js(callback), ReadyCallback::same)
}

/// The page's one bootstrap
struct Page {
    config: LoaderConfig,
    bootstrap: Bootstrap<ReadyCallback>,
    // Lives as long as the page; the global hook points at it.
    _hook: Closure<dyn FnMut()>,
}

thread_local! {
    static PAGE: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

fn current_page() -> Option<Rc<Page>> {
    PAGE.with(|slot| slot.borrow().clone())
}

impl Page {
    /// Publish the global hook. A function already sitting there is kept
    /// and called after the gate drains.
    fn install(host: &DomHost, config: LoaderConfig) -> Result<Self> {
        let bootstrap: Bootstrap<ReadyCallback> = Bootstrap::new();
        let name = config.ready_hook.clone();

        let existing = host.global(&name);
        let previous = existing.dyn_ref::<Function>().cloned();
        if previous.is_some() {
            info!(hook = %name, "Chaining existing ready hook");
        } else if !existing.is_undefined() {
            warn!(hook = %name, "Replacing non-function value of ready hook");
        }

        let gate = bootstrap.gate();
        let hook = Closure::<dyn FnMut()>::new(move || {
            gate.on_external_ready();
            if let Some(previous) = &previous {
                if let Err(err) = previous.call0(&JsValue::NULL) {
                    error!(error = ?err, "Previous ready hook threw");
                }
            }
        });
        host.set_global(&name, hook.as_ref())?;
        debug!(hook = %name, "Ready hook installed");

        Ok(Self {
            config,
            bootstrap,
            _hook: hook,
        })
    }
}

/// Handle onto the page's IFrame API bootstrap
pub struct YouTubeLoader {
    host: DomHost,
    page: Rc<Page>,
}

impl YouTubeLoader {
    /// Bootstrap the page with `config`: install the hook, inject the script
    /// and arm the load warning.
    ///
    /// If the page is already bootstrapped this returns a handle onto that
    /// bootstrap; `config` is ignored.
    pub fn start(config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        let host = DomHost::new()?;

        let (page, fresh) = match current_page() {
            Some(page) => {
                if page.config != config {
                    warn!("IFrame API already bootstrapped on this page, ignoring new loader config");
                }
                (page, false)
            }
            None => {
                let page = Rc::new(Page::install(&host, config)?);
                PAGE.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&page)));
                (page, true)
            }
        };

        let loader = Self { host, page };
        loader.inject()?;
        if fresh {
            loader.arm_load_warning()?;
        }
        Ok(loader)
    }

    /// Handle onto the page bootstrap, starting it with defaults if needed
    pub fn attach() -> Result<Self> {
        match current_page() {
            Some(page) => {
                let loader = Self {
                    host: DomHost::new()?,
                    page,
                };
                loader.inject()?;
                Ok(loader)
            }
            None => Self::start(LoaderConfig::default()),
        }
    }

    /// Config the page was bootstrapped with
    pub fn config(&self) -> &LoaderConfig {
        &self.page.config
    }

    /// Shared handle to the page gate
    pub fn gate(&self) -> Rc<Gate> {
        self.page.bootstrap.gate()
    }

    /// What injection did on this page
    pub fn injection(&self) -> Option<Injection> {
        self.page.bootstrap.injection()
    }

    /// Inject the bootstrap script; the page keeps the first outcome
    pub fn inject(&self) -> Result<Injection> {
        self.page.bootstrap.load(&self.host, &self.page.config)
    }

    /// Warn if the hook has not fired after `load_timeout_ms`.
    ///
    /// Waiters are left queued; a late load still runs them.
    fn arm_load_warning(&self) -> Result<()> {
        let Some(timeout_ms) = self.page.config.load_timeout_ms else {
            return Ok(());
        };

        let gate = Rc::downgrade(&self.gate());
        let src = self.page.config.script_url.clone();
        let check = Closure::once_into_js(move || {
            let Some(gate) = gate.upgrade() else {
                return;
            };
            if !gate.is_ready() {
                warn!(
                    src = %src,
                    timeout_ms,
                    pending = gate.pending(),
                    "IFrame API has not signalled ready"
                );
            }
        });

        self.host
            .window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                check.unchecked_ref(),
                i32::try_from(timeout_ms).unwrap_or(i32::MAX),
            )
            .map_err(js_error)?;
        Ok(())
    }

    /// Run `callback` once the API is ready
    pub fn register_on_ready<F>(&self, callback: F) -> Registration
    where
        F: FnOnce() + 'static,
    {
        self.gate().register_on_ready(ReadyCallback::Rust(Box::new(callback)))
    }

    pub fn unregister_on_ready(&self, id: WaiterId) -> bool {
        self.gate().unregister_on_ready(id)
    }

    pub fn is_ready(&self) -> bool {
        self.page.bootstrap.gate().is_ready()
    }
}

/// The page gate, if anything has bootstrapped the page yet
pub fn page_gate() -> Option<Rc<Gate>> {
    current_page().map(|page| page.bootstrap.gate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn rust_callback(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> ReadyCallback {
        let log = Rc::clone(log);
        ReadyCallback::Rust(Box::new(move || log.borrow_mut().push(name)))
    }

    #[test]
    fn test_rust_callbacks_through_gate() {
        let gate = Gate::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second"] {
            gate.register_on_ready(rust_callback(&log, name));
        }

        assert_eq!(gate.on_external_ready(), 2);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_rust_callbacks_are_never_duplicates() {
        let gate = Gate::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let a = gate.register_unique_on_ready(rust_callback(&log, "a"), ReadyCallback::same);
        let b = gate.register_unique_on_ready(rust_callback(&log, "a"), ReadyCallback::same);

        assert_ne!(a, b);
        assert_eq!(gate.pending(), 2);
        gate.on_external_ready();
        assert_eq!(*log.borrow(), vec!["a", "a"]);
    }

    #[test]
    fn test_no_page_before_bootstrap() {
        assert!(page_gate().is_none());
    }
}
