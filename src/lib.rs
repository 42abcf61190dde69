#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! A client-side navigation engine for the Mimir desktop document editor.
//!
//! The editor is a single-page application: one root container, a set of
//! page routes (home, editor, viewer, settings), and a [`Router`] that owns
//! every transition between them. The router matches URL-like paths against
//! registered patterns, runs each page's lifecycle hooks, keeps the last
//! visited location in a session store so a reload resumes where the user
//! left off, and guarantees that a failed navigation still leaves an error
//! view on screen rather than a blank page.
//!
//! Patterns support literal segments, named parameters and catch-all
//! parameters:
//!
//! ```ignore
//!  Syntax    Type
//!  :name     named parameter, captures exactly one path component
//!  :name+    catch-all, captures one or more trailing components
//! ```
//!
//! Routes are matched in insertion order and the first match wins, so more
//! specific routes should be registered before catch-alls.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use mimir_router::{Element, MemoryStore, RootContainer, Route, Router};
//!
//! let host = Rc::new(RefCell::new(RootContainer::new()));
//! let store = Rc::new(MemoryStore::new());
//! let router = Router::new(host.clone(), store);
//!
//! router.add_route(
//!     Route::new("", |_url, _params, _router| {
//!         Box::pin(async { Ok(Element::new("div").text("Home").into()) })
//!     })
//!     .unwrap(),
//! );
//! router.add_route(
//!     Route::new("edit/:path+", |_url, params, _router| {
//!         let path = params.get_many("path").unwrap_or(&[]).join("/");
//!         Box::pin(async move { Ok(Element::new("div").text(path).into()) })
//!     })
//!     .unwrap(),
//! );
//!
//! futures::executor::block_on(router.serve(None));
//! assert!(router.is_serving());
//! assert!(host.borrow().view().is_some());
//! ```
//!
//! Pages never touch the container or the router's state directly: render
//! functions receive a [`RouterHandle`] and the extracted [`Params`], and
//! everything the host application exposes to pages (dialogs, document
//! storage, exporters) goes through the [`bridge::HostBridge`] trait rather
//! than an ambient global.

#[macro_use]
extern crate log;

pub mod bridge;
mod error;
mod params;
mod pattern;
mod route;
mod router;
mod session;
mod view;

pub use error::PatternError;
pub use params::{ParamValue, Params};
pub use pattern::Pattern;
pub use route::{ErrorRoute, ExitFuture, PageError, RenderFuture, Route};
pub use router::{LinkAction, NavOutcome, Router, RouterHandle, WindowShell, NO_LINK_ATTR};
pub use session::{MemoryStore, SessionStore, SESSION_URL_KEY};
pub use view::{Element, RootContainer, ViewHost, ViewNode};
