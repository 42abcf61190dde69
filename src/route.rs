use std::fmt;

use futures::future::LocalBoxFuture;

use crate::error::PatternError;
use crate::params::Params;
use crate::pattern::Pattern;
use crate::router::RouterHandle;
use crate::view::ViewNode;

/// An error raised by a page's render function.
pub type PageError = Box<dyn std::error::Error>;

/// The future returned by a render function.
pub type RenderFuture = LocalBoxFuture<'static, Result<ViewNode, PageError>>;

/// The future returned by a page's exit hook. Resolves to `false` when the
/// page would rather not be left (see [`Route::on_exit`]).
pub type ExitFuture = LocalBoxFuture<'static, bool>;

type RenderFn = Box<dyn Fn(String, Params, RouterHandle) -> RenderFuture>;
type OnRenderFn = Box<dyn Fn()>;
type OnExitFn = Box<dyn Fn() -> ExitFuture>;
type ErrorRenderFn = Box<dyn Fn(String, String, RouterHandle) -> RenderFuture>;

/// A page route: a compiled pattern bound to a render function and its
/// optional lifecycle hooks. Immutable once registered.
pub struct Route {
    pattern: Pattern,
    render: RenderFn,
    on_render: Option<OnRenderFn>,
    on_exit: Option<OnExitFn>,
}

impl Route {
    /// Creates a route from a pattern string and a render function.
    ///
    /// The render function receives the navigated URL, the extracted
    /// parameters and a handle back to the router, and must produce a
    /// mountable element.
    pub fn new<F>(pattern: &str, render: F) -> Result<Self, PatternError>
    where
        F: Fn(String, Params, RouterHandle) -> RenderFuture + 'static,
    {
        Ok(Route {
            pattern: Pattern::parse(pattern)?,
            render: Box::new(render),
            on_render: None,
            on_exit: None,
        })
    }

    /// Sets a hook invoked after the rendered view is mounted, so it can
    /// inspect the live view tree.
    pub fn on_render<F>(mut self, hook: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_render = Some(Box::new(hook));
        self
    }

    /// Sets a hook awaited before navigating away from this page.
    ///
    /// The hook's boolean result does not block navigation at the router
    /// level; it is logged and the transition proceeds. Pages that want to
    /// cancel a leave (an editor prompting to save changes, say) gate their
    /// own `navigate` calls before ever reaching the router.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn() -> ExitFuture + 'static,
    {
        self.on_exit = Some(Box::new(hook));
        self
    }

    /// Returns the route's compiled pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub(crate) fn matches(&self, url: &str) -> Option<Params> {
        self.pattern.matches(url)
    }

    pub(crate) fn render(&self, url: String, params: Params, router: RouterHandle) -> RenderFuture {
        (self.render)(url, params, router)
    }

    pub(crate) fn render_hook(&self) {
        if let Some(hook) = &self.on_render {
            hook();
        }
    }

    pub(crate) fn exit_hook(&self) -> Option<ExitFuture> {
        self.on_exit.as_ref().map(|hook| hook())
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .field("has_on_render", &self.on_render.is_some())
            .field("has_on_exit", &self.on_exit.is_some())
            .finish()
    }
}

/// A handler for a numeric failure code.
///
/// The render function receives the URL the failure occurred on, the
/// failure data (the unresolved path for a 404, the error text for a 500)
/// and a handle back to the router.
pub struct ErrorRoute {
    code: u16,
    render: ErrorRenderFn,
}

impl ErrorRoute {
    /// Creates an error handler for the given code.
    pub fn new<F>(code: u16, render: F) -> Self
    where
        F: Fn(String, String, RouterHandle) -> RenderFuture + 'static,
    {
        ErrorRoute {
            code,
            render: Box::new(render),
        }
    }

    /// Returns the code this handler is registered for.
    pub fn code(&self) -> u16 {
        self.code
    }

    pub(crate) fn render(&self, url: String, data: String, router: RouterHandle) -> RenderFuture {
        (self.render)(url, data, router)
    }
}

impl fmt::Debug for ErrorRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorRoute").field("code", &self.code).finish()
    }
}
