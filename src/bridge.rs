//! Host capabilities exposed to pages.
//!
//! The privileged desktop shell owns the filesystem, native dialogs and
//! exporters. Pages reach it through the [`HostBridge`] trait instead of an
//! ambient global, with enumerated option records per call site rather than
//! untyped option bags. The router itself only depends on the narrow
//! [`WindowShell`](crate::WindowShell) slice of this surface.
//!
//! [`MemoryBridge`] is an in-process implementation holding documents,
//! recents, favorites and settings in memory. It backs the test suite and
//! any headless use of the page layer; dialog and export capabilities that
//! need a real shell report [`BridgeError::Unavailable`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;

use futures::future::LocalBoxFuture;

use crate::router::WindowShell;

/// The result of a bridge call.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// The future returned by asynchronous bridge calls.
pub type BridgeFuture<T> = LocalBoxFuture<'static, BridgeResult<T>>;

/// Represents errors reported by the host shell.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BridgeError {
    /// The document or path does not exist.
    NotFound(String),
    /// The host failed to read or write data.
    Io(String),
    /// The capability is not available on this host, e.g. a missing PDF
    /// tool or a headless shell with no dialogs.
    Unavailable(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "not found: {}", path),
            Self::Io(message) => write!(f, "i/o failure: {}", message),
            Self::Unavailable(capability) => write!(f, "capability unavailable: {}", capability),
        }
    }
}

impl std::error::Error for BridgeError {}

/// A document as stored by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Display name, shown in title bars and listings.
    pub name: String,
    /// Serialized rich-text content.
    pub content: String,
}

/// Metadata for a stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub name: String,
    pub size: u64,
    pub is_favorite: bool,
}

/// A file-type filter for open/save dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Creates a filter from a display name and a list of extensions.
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        FileFilter {
            name: name.into(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

/// Options for the native open/save dialogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDialogOptions {
    pub filters: Vec<FileFilter>,
}

/// The flavor of a modal message dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Question,
    Warning,
    Error,
}

/// Options for a modal message dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOptions {
    pub message: String,
    pub detail: Option<String>,
    pub kind: MessageKind,
    /// Button labels, in display order. Empty means a single OK button.
    pub buttons: Vec<String>,
}

impl MessageOptions {
    /// Creates a plain informational message.
    pub fn info(message: impl Into<String>) -> Self {
        MessageOptions {
            message: message.into(),
            detail: None,
            kind: MessageKind::Info,
            buttons: Vec::new(),
        }
    }

    /// Creates a question with the given button labels.
    pub fn question(message: impl Into<String>, buttons: &[&str]) -> Self {
        MessageOptions {
            message: message.into(),
            detail: None,
            kind: MessageKind::Question,
            buttons: buttons.iter().map(|label| label.to_string()).collect(),
        }
    }
}

/// The user's answer to a message dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageResponse {
    /// Index of the pressed button.
    pub button: usize,
}

/// User-facing editor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub spellcheck: bool,
    /// Zoom percentage; 100 is unscaled.
    pub default_zoom: u32,
    /// How many entries the recent-files list keeps.
    pub recent_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            spellcheck: true,
            default_zoom: 100,
            recent_capacity: 20,
        }
    }
}

/// Options for exporting a document to PDF through the host's PDF tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfExportOptions {
    /// Paper size name, e.g. `"A4"`. The tool's default when unset.
    pub page_size: Option<String>,
    /// Zoom percentage; 100 is unscaled.
    pub zoom_factor: Option<u32>,
    /// Render the tool's default page header.
    pub default_header: bool,
}

/// The capability surface the privileged shell exposes to pages.
///
/// Single-threaded by design: implementations live on the UI thread next
/// to the router, and asynchronous calls return local boxed futures.
pub trait HostBridge {
    /// One-time startup handshake with the shell.
    fn init(&self) -> BridgeFuture<()>;

    /// Reads a document. Touches the recent-files list.
    fn open_document(&self, path: &str) -> BridgeFuture<Document>;
    /// Writes a document. Touches the recent-files list.
    fn save_document(&self, path: &str, doc: &Document) -> BridgeFuture<()>;
    /// Returns metadata for a stored document without opening it.
    fn document_info(&self, path: &str) -> BridgeFuture<DocumentInfo>;

    /// Shows a modal message dialog and resolves with the pressed button.
    fn message(&self, options: MessageOptions) -> BridgeFuture<MessageResponse>;
    /// Shows a native open dialog. Resolves to `None` when dismissed.
    fn open_dialog(&self, options: FileDialogOptions) -> BridgeFuture<Option<String>>;
    /// Shows a native save dialog. Resolves to `None` when dismissed.
    fn save_dialog(&self, options: FileDialogOptions) -> BridgeFuture<Option<String>>;

    /// Most-recently-used paths, newest first.
    fn recent_files(&self) -> BridgeFuture<Vec<String>>;
    fn remove_recent(&self, path: &str) -> BridgeFuture<()>;

    /// Favorite paths, newest first.
    fn favorites(&self) -> BridgeFuture<Vec<String>>;
    fn add_favorite(&self, path: &str) -> BridgeFuture<()>;
    fn remove_favorite(&self, path: &str) -> BridgeFuture<()>;

    fn settings(&self) -> BridgeFuture<Settings>;
    fn set_settings(&self, settings: Settings) -> BridgeFuture<()>;

    /// Converts a foreign file into a document.
    fn import_file(&self, path: &str) -> BridgeFuture<Document>;
    /// Writes a document to a foreign path.
    fn export_file(&self, path: &str, doc: &Document) -> BridgeFuture<()>;
    /// Renders HTML to a PDF file through the host's PDF tool.
    fn export_pdf(&self, path: &str, html: &str, options: PdfExportOptions) -> BridgeFuture<()>;
    /// Writes the plain-text rendition of HTML to a file.
    fn export_plaintext(&self, path: &str, html: &str) -> BridgeFuture<()>;

    /// Opens a URL in the system browser.
    fn open_external(&self, url: &str) -> BridgeFuture<()>;
    /// Closes the application window.
    fn close(&self) -> BridgeFuture<()>;
    /// Sets the window title. Fire and forget.
    fn set_title(&self, title: &str);
}

/// Every bridge can serve as the router's window-title capability.
impl<B: HostBridge> WindowShell for B {
    fn set_title(&self, title: &str) {
        HostBridge::set_title(self, title);
    }
}

/// An in-memory [`HostBridge`].
///
/// Documents, recents, favorites and settings live in process memory.
/// Dialogs resolve to preconfigured answers so page flows can be driven
/// headlessly.
#[derive(Debug, Default)]
pub struct MemoryBridge {
    documents: RefCell<HashMap<String, Document>>,
    recents: RefCell<Vec<String>>,
    favorites: RefCell<Vec<String>>,
    settings: RefCell<Settings>,
    title: RefCell<String>,
    dialog_answer: RefCell<Option<String>>,
    message_answer: Cell<usize>,
    closed: Cell<bool>,
}

impl MemoryBridge {
    /// Creates an empty bridge with default settings.
    pub fn new() -> Self {
        MemoryBridge::default()
    }

    /// Seeds a stored document.
    pub fn insert_document(&self, path: impl Into<String>, doc: Document) {
        self.documents.borrow_mut().insert(path.into(), doc);
    }

    /// Sets the path the next open/save dialog resolves to. `None`
    /// simulates the user dismissing the dialog.
    pub fn set_dialog_answer(&self, path: Option<String>) {
        *self.dialog_answer.borrow_mut() = path;
    }

    /// Sets the button index the next message dialog resolves to.
    pub fn set_message_answer(&self, button: usize) {
        self.message_answer.set(button);
    }

    /// Returns the last title set through the bridge.
    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    /// Returns `true` once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    // Move-to-front insert, deduplicated, capped at the configured
    // capacity. Mirrors how the shell maintains its store.
    fn touch_recent(&self, path: &str) {
        let capacity = self.settings.borrow().recent_capacity;
        let mut recents = self.recents.borrow_mut();
        recents.retain(|entry| entry != path);
        recents.insert(0, path.to_string());
        recents.truncate(capacity);
    }
}

fn ready<T: 'static>(result: BridgeResult<T>) -> BridgeFuture<T> {
    Box::pin(futures::future::ready(result))
}

impl HostBridge for MemoryBridge {
    fn init(&self) -> BridgeFuture<()> {
        ready(Ok(()))
    }

    fn open_document(&self, path: &str) -> BridgeFuture<Document> {
        let doc = self.documents.borrow().get(path).cloned();
        match doc {
            Some(doc) => {
                self.touch_recent(path);
                ready(Ok(doc))
            }
            None => ready(Err(BridgeError::NotFound(path.to_string()))),
        }
    }

    fn save_document(&self, path: &str, doc: &Document) -> BridgeFuture<()> {
        self.documents
            .borrow_mut()
            .insert(path.to_string(), doc.clone());
        self.touch_recent(path);
        ready(Ok(()))
    }

    fn document_info(&self, path: &str) -> BridgeFuture<DocumentInfo> {
        let doc = self.documents.borrow().get(path).cloned();
        match doc {
            Some(doc) => {
                let is_favorite = self.favorites.borrow().iter().any(|entry| entry == path);
                ready(Ok(DocumentInfo {
                    name: doc.name,
                    size: doc.content.len() as u64,
                    is_favorite,
                }))
            }
            None => ready(Err(BridgeError::NotFound(path.to_string()))),
        }
    }

    fn message(&self, options: MessageOptions) -> BridgeFuture<MessageResponse> {
        debug!("message dialog: {:?}", options.message);
        ready(Ok(MessageResponse {
            button: self.message_answer.get(),
        }))
    }

    fn open_dialog(&self, _options: FileDialogOptions) -> BridgeFuture<Option<String>> {
        ready(Ok(self.dialog_answer.borrow().clone()))
    }

    fn save_dialog(&self, _options: FileDialogOptions) -> BridgeFuture<Option<String>> {
        ready(Ok(self.dialog_answer.borrow().clone()))
    }

    fn recent_files(&self) -> BridgeFuture<Vec<String>> {
        ready(Ok(self.recents.borrow().clone()))
    }

    fn remove_recent(&self, path: &str) -> BridgeFuture<()> {
        self.recents.borrow_mut().retain(|entry| entry != path);
        ready(Ok(()))
    }

    fn favorites(&self) -> BridgeFuture<Vec<String>> {
        ready(Ok(self.favorites.borrow().clone()))
    }

    fn add_favorite(&self, path: &str) -> BridgeFuture<()> {
        let mut favorites = self.favorites.borrow_mut();
        favorites.retain(|entry| entry != path);
        favorites.insert(0, path.to_string());
        ready(Ok(()))
    }

    fn remove_favorite(&self, path: &str) -> BridgeFuture<()> {
        self.favorites.borrow_mut().retain(|entry| entry != path);
        ready(Ok(()))
    }

    fn settings(&self) -> BridgeFuture<Settings> {
        let settings = self.settings.borrow().clone();
        // The recent-files list honors a lowered capacity immediately.
        self.recents.borrow_mut().truncate(settings.recent_capacity);
        ready(Ok(settings))
    }

    fn set_settings(&self, settings: Settings) -> BridgeFuture<()> {
        *self.settings.borrow_mut() = settings;
        ready(Ok(()))
    }

    fn import_file(&self, path: &str) -> BridgeFuture<Document> {
        let doc = self.documents.borrow().get(path).cloned();
        match doc {
            Some(doc) => ready(Ok(doc)),
            None => ready(Err(BridgeError::NotFound(path.to_string()))),
        }
    }

    fn export_file(&self, path: &str, doc: &Document) -> BridgeFuture<()> {
        self.documents
            .borrow_mut()
            .insert(path.to_string(), doc.clone());
        ready(Ok(()))
    }

    fn export_pdf(&self, _path: &str, _html: &str, _options: PdfExportOptions) -> BridgeFuture<()> {
        ready(Err(BridgeError::Unavailable("pdf tool".to_string())))
    }

    fn export_plaintext(&self, path: &str, html: &str) -> BridgeFuture<()> {
        let doc = Document {
            name: path.to_string(),
            content: strip_tags(html),
        };
        self.documents.borrow_mut().insert(path.to_string(), doc);
        ready(Ok(()))
    }

    fn open_external(&self, url: &str) -> BridgeFuture<()> {
        ready(Err(BridgeError::Unavailable(format!(
            "system browser ({})",
            url
        ))))
    }

    fn close(&self) -> BridgeFuture<()> {
        self.closed.set(true);
        ready(Ok(()))
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }
}

// Minimal tag stripping for the plain-text export.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
