//! The navigation engine.
//!
//! One [`Router`] instance owns the root container, the route table and the
//! current location for the lifetime of the application. Every page
//! transition goes through [`Router::navigate`], which runs the full
//! exit → persist → match → render → mount cycle and converts failures at
//! any stage into a mounted error view. The engine is single-threaded and
//! cooperative: hooks and render functions are awaited in place, and a
//! navigation that is overtaken by a newer one quietly abandons its writes
//! instead of committing stale state.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::params::Params;
use crate::route::{ErrorRoute, Route};
use crate::session::{SessionStore, SESSION_URL_KEY};
use crate::view::{Element, ViewHost, ViewNode};

/// Attribute that opts an anchor (or any of its ancestors) out of link
/// interception. The embedded rich-text editor sets this on its own inline
/// links so the router leaves them to the host.
pub const NO_LINK_ATTR: &str = "router-no-link";

/// A shared handle to the navigation engine, as passed to render functions.
pub type RouterHandle = Rc<Router>;

/// The host window's title capability. Fire and forget.
pub trait WindowShell {
    /// Sets the window title.
    fn set_title(&self, title: &str);
}

/// The outcome of a single navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The requested page was rendered, mounted and committed.
    Committed,
    /// No route matched; the 404 view was mounted.
    NotFound,
    /// The matched route failed to render; the 500 view was mounted.
    RenderFailed,
    /// A newer navigation started while this one was pending; nothing was
    /// mounted or committed.
    Superseded,
}

impl NavOutcome {
    /// Returns `true` if the navigation committed its page.
    pub fn is_committed(&self) -> bool {
        matches!(self, NavOutcome::Committed)
    }
}

/// What the router decided to do with an intercepted click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Not a router link; let the host's default behavior run.
    Pass,
    /// A fragment-only link; consume the event without navigating.
    Swallow,
    /// An in-app link; prevent the default and navigate to the href.
    Navigate(String),
}

struct RouterState {
    url: String,
    route: Option<Rc<Route>>,
    serving: bool,
}

type ServeFn = Box<dyn FnOnce(RouterHandle)>;

/// The navigation engine. See the [crate docs](crate) for an overview.
pub struct Router {
    this: Weak<Router>,
    host: Rc<RefCell<dyn ViewHost>>,
    store: Rc<dyn SessionStore>,
    shell: RefCell<Option<Rc<dyn WindowShell>>>,
    routes: RefCell<Vec<Rc<Route>>>,
    error_routes: RefCell<HashMap<u16, Rc<ErrorRoute>>>,
    state: RefCell<RouterState>,
    on_serve: RefCell<Option<ServeFn>>,
    // Bumped by every navigate call; a pending navigation that observes a
    // newer value after an await abandons all further writes.
    epoch: Cell<u64>,
}

impl Router {
    /// Creates a router rendering into `host` and persisting its location
    /// to `store`.
    pub fn new(host: Rc<RefCell<dyn ViewHost>>, store: Rc<dyn SessionStore>) -> RouterHandle {
        Rc::new_cyclic(|this| Router {
            this: this.clone(),
            host,
            store,
            shell: RefCell::new(None),
            routes: RefCell::new(Vec::new()),
            error_routes: RefCell::new(HashMap::new()),
            state: RefCell::new(RouterState {
                url: String::new(),
                route: None,
                serving: false,
            }),
            on_serve: RefCell::new(None),
            epoch: Cell::new(0),
        })
    }

    /// Binds the window-title capability.
    pub fn set_shell(&self, shell: Rc<dyn WindowShell>) {
        *self.shell.borrow_mut() = Some(shell);
    }

    /// Appends a route to the route table.
    ///
    /// Routes are matched in insertion order and the first match wins.
    /// Duplicate patterns are legal; the earlier registration shadows the
    /// later one.
    pub fn add_route(&self, route: Route) {
        self.routes.borrow_mut().push(Rc::new(route));
    }

    /// Registers an error handler, replacing any previous handler for the
    /// same code.
    pub fn add_error_route(&self, route: ErrorRoute) {
        self.error_routes.borrow_mut().insert(route.code(), Rc::new(route));
    }

    /// Sets a callback invoked once, after the first navigation settles.
    pub fn on_serve<F>(&self, callback: F)
    where
        F: FnOnce(RouterHandle) + 'static,
    {
        *self.on_serve.borrow_mut() = Some(Box::new(callback));
    }

    /// Returns the current URL.
    pub fn current_url(&self) -> String {
        self.state.borrow().url.clone()
    }

    /// Returns the pattern of the committed route, if a page is active.
    pub fn current_route_pattern(&self) -> Option<String> {
        self.state
            .borrow()
            .route
            .as_ref()
            .map(|route| route.pattern().as_str().to_string())
    }

    /// Returns `true` once [`serve`](Router::serve) has completed its first
    /// navigation.
    pub fn is_serving(&self) -> bool {
        self.state.borrow().serving
    }

    /// Sets the host window's title.
    pub fn set_title(&self, title: &str) {
        match self.shell.borrow().as_ref() {
            Some(shell) => shell.set_title(title),
            None => debug!("no window shell bound, dropping title {:?}", title),
        }
    }

    /// One-time activation.
    ///
    /// Resolves the starting URL in order: a previously persisted session
    /// URL, the `go` override, the root path. Once the first navigation
    /// settles the router is serving and the serve callback (if any) runs
    /// exactly once.
    pub async fn serve(&self, go: Option<&str>) {
        let start = self
            .store
            .get(SESSION_URL_KEY)
            .unwrap_or_else(|| go.unwrap_or("").to_string());

        debug!("serving from {:?}", start);
        self.navigate(&start).await;

        self.state.borrow_mut().serving = true;
        let callback = self.on_serve.borrow_mut().take();
        if let Some(callback) = callback {
            callback(self.handle());
        }
    }

    /// Navigates to a URL.
    ///
    /// Awaits the current page's exit hook, persists the new location,
    /// matches it against the route table and mounts the rendered page.
    /// A failure at any stage mounts an error view instead; the container
    /// never settles empty. If another navigation starts while this one is
    /// awaiting a hook, this one returns [`NavOutcome::Superseded`] without
    /// touching the container.
    pub async fn navigate(&self, url: &str) -> NavOutcome {
        let epoch = self.epoch.get().wrapping_add(1);
        self.epoch.set(epoch);
        debug!("navigating to {:?}", url);

        // Leave the current page. The route is cleared before anything
        // else runs, whatever the hook resolves to.
        let previous = self.state.borrow_mut().route.take();
        let exit = previous.and_then(|route| route.exit_hook());
        if let Some(exit) = exit {
            if !exit.await {
                debug!("exit hook reported cancel; navigation to {:?} proceeds", url);
            }
            if self.superseded(epoch) {
                return NavOutcome::Superseded;
            }
        }

        // Persist the new location so a reload resumes here.
        self.state.borrow_mut().url = url.to_string();
        self.store.set(SESSION_URL_KEY, url.to_string());

        let Some((route, params)) = self.match_url(url) else {
            debug!("no route matches {:?}", url);
            self.dispatch_error(404, url.to_string()).await;
            return NavOutcome::NotFound;
        };

        let rendered = route.render(url.to_string(), params, self.handle()).await;
        if self.superseded(epoch) {
            return NavOutcome::Superseded;
        }

        let view = match rendered {
            Ok(view) if view.is_element() => view,
            Ok(other) => {
                trace!(
                    "route {:?} rendered a non-element view: {:?}",
                    route.pattern().as_str(),
                    other
                );
                self.dispatch_error(500, not_an_element(&other)).await;
                return NavOutcome::RenderFailed;
            }
            Err(err) => {
                trace!("route {:?} failed to render: {}", route.pattern().as_str(), err);
                self.dispatch_error(500, err.to_string()).await;
                return NavOutcome::RenderFailed;
            }
        };

        self.host.borrow_mut().mount(view);
        route.render_hook();
        self.state.borrow_mut().route = Some(route);
        NavOutcome::Committed
    }

    /// Handles a history back/forward event by re-running a full navigation
    /// to the given location, so router state and host location never
    /// diverge.
    pub async fn handle_pop_state(&self, location: &str) -> NavOutcome {
        self.navigate(location).await
    }

    /// Resolves an intercepted click against the router's link rules.
    ///
    /// `path` is the event path, ordered from the click target up to the
    /// root. The nearest enclosing anchor decides the outcome: no anchor or
    /// a missing `href` passes the event through, the [`NO_LINK_ATTR`]
    /// opt-out marker on the anchor or any of its ancestors passes it
    /// through, a fragment-only href is swallowed, and anything else is an
    /// in-app navigation.
    pub fn resolve_click(path: &[&Element]) -> LinkAction {
        let Some(anchor_index) = path.iter().position(|element| element.tag() == "a") else {
            return LinkAction::Pass;
        };

        if path[anchor_index..]
            .iter()
            .any(|element| element.get_attr(NO_LINK_ATTR).is_some())
        {
            return LinkAction::Pass;
        }

        let Some(href) = path[anchor_index].get_attr("href") else {
            return LinkAction::Pass;
        };
        if href.starts_with('#') {
            return LinkAction::Swallow;
        }

        LinkAction::Navigate(href.to_string())
    }

    /// Drives a resolved click. Returns the navigation outcome when the
    /// action was a navigation.
    pub async fn handle_click(&self, action: LinkAction) -> Option<NavOutcome> {
        match action {
            LinkAction::Navigate(url) => Some(self.navigate(&url).await),
            LinkAction::Pass | LinkAction::Swallow => None,
        }
    }

    /// Routes a failure through the registered error handlers.
    ///
    /// A registered handler renders its own view for the code; a missing,
    /// failing or non-element-producing handler collapses to the built-in
    /// default view, which cannot fail. Handler failures never recurse.
    pub async fn dispatch_error(&self, code: u16, data: String) {
        let epoch = self.epoch.get();

        let handler = self.error_routes.borrow().get(&code).cloned();
        let Some(handler) = handler else {
            self.default_error(code, &data);
            return;
        };

        let url = self.current_url();
        let rendered = handler.render(url, data, self.handle()).await;
        if self.superseded(epoch) {
            return;
        }

        match rendered {
            Ok(view) if view.is_element() => self.host.borrow_mut().mount(view),
            Ok(other) => {
                trace!("error handler for {} rendered a non-element view: {:?}", code, other);
                self.default_error(500, &not_an_element(&other));
            }
            Err(err) => {
                trace!("error handler for {} failed: {}", code, err);
                self.default_error(500, &err.to_string());
            }
        }
    }

    /// Synchronously replaces the container's contents with a plain
    /// heading-and-paragraph error view. The last-resort path: it only
    /// sets static text and cannot fail.
    pub fn display_error(&self, title: &str, body: &str) {
        let view = Element::new("div")
            .child(Element::new("h1").text(title))
            .child(Element::new("p").text(body));
        self.host.borrow_mut().mount(view.into());
    }

    fn default_error(&self, code: u16, data: &str) {
        self.display_error(&format!("Error {}", code), &default_error_text(code, data));
    }

    fn match_url(&self, url: &str) -> Option<(Rc<Route>, Params)> {
        let routes = self.routes.borrow();
        for route in routes.iter() {
            if let Some(params) = route.matches(url) {
                return Some((Rc::clone(route), params));
            }
        }
        None
    }

    fn superseded(&self, epoch: u64) -> bool {
        self.epoch.get() != epoch
    }

    fn handle(&self) -> RouterHandle {
        self.this.upgrade().expect("router was dropped while in use")
    }
}

fn default_error_text(code: u16, data: &str) -> String {
    match code {
        404 => format!("Couldn't resolve path: {}", data),
        500 => format!("Internal server error: {}", data),
        _ if !data.is_empty() => format!("Error: {}.", data),
        _ => "Error. No additional information provided.".to_string(),
    }
}

fn not_an_element(view: &ViewNode) -> String {
    let got = match view {
        ViewNode::Element(element) => format!("<{}>", element.tag()),
        ViewNode::Text(text) => format!("text {:?}", text),
    };
    format!("Rendered view is not an element. Got {} instead.", got)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_error_texts() {
        assert_eq!(
            default_error_text(404, "nope"),
            "Couldn't resolve path: nope"
        );
        assert_eq!(
            default_error_text(500, "boom"),
            "Internal server error: boom"
        );
        assert_eq!(default_error_text(418, "teapot"), "Error: teapot.");
        assert_eq!(
            default_error_text(999, ""),
            "Error. No additional information provided."
        );
    }
}
