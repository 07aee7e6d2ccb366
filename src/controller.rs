//! UI-agnostic inbox controller.
//!
//! [`InboxController`] owns the session address and every view model. A front end
//! forwards user actions as [`Command`]s (or calls the handlers directly) and draws
//! from [`InboxController::snapshot`]; it never touches the network itself.

use crate::catalog::CatalogState;
use crate::clipboard::{self, Clipboard, CopyButton, SystemClipboard};
use crate::config::Config;
use crate::fence::RequestFence;
use crate::inbox::InboxView;
use crate::session::SessionAddress;
use crate::viewer::DetailView;
use crate::{Client, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadDomains,
    SelectDomain(String),
    Refresh,
    OpenMessage(String),
    CloseMessage,
    CopyAddress,
}

/// Point-in-time copy of everything a front end draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub session: SessionAddress,
    pub catalog: CatalogState,
    pub inbox: InboxView,
    pub detail: DetailView,
    pub copy_label: &'static str,
}

impl Snapshot {
    pub fn address(&self) -> String {
        self.session.address()
    }
}

#[derive(Debug)]
struct ViewState {
    session: SessionAddress,
    catalog: CatalogState,
    inbox: InboxView,
    detail: DetailView,
}

/// Drives the address, catalog, inbox and detail views.
///
/// All handlers take `&self`, so a controller can be shared (e.g. in an `Arc`) and
/// handlers may run concurrently. The view lock is never held across an `.await`.
pub struct InboxController {
    client: Client,
    clipboard: Arc<dyn Clipboard>,
    page_limit: u32,
    copy_button: CopyButton,
    inbox_fence: RequestFence,
    detail_fence: RequestFence,
    state: Mutex<ViewState>,
}

impl InboxController {
    /// Controller for `session`, using the system clipboard and default page size.
    pub fn new(client: Client, session: SessionAddress) -> Self {
        Self {
            client,
            clipboard: Arc::new(SystemClipboard),
            page_limit: crate::client::DEFAULT_PAGE_LIMIT,
            copy_button: CopyButton::default(),
            inbox_fence: RequestFence::new(),
            detail_fence: RequestFence::new(),
            state: Mutex::new(ViewState {
                session,
                catalog: CatalogState::default(),
                inbox: InboxView::default(),
                detail: DetailView::default(),
            }),
        }
    }

    /// Build the client from `config`; generate a session on the default domain unless
    /// one is given.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config, session: Option<SessionAddress>) -> Result<Self> {
        let client = config.client_builder().build()?;
        let session =
            session.unwrap_or_else(|| SessionAddress::generate(config.default_domain.clone()));
        Ok(Self::new(client, session)
            .with_page_limit(config.page_limit)
            .with_copy_button(CopyButton::new(config.copy_feedback())))
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn with_copy_button(mut self, button: CopyButton) -> Self {
        self.copy_button = button;
        self
    }

    pub fn session(&self) -> SessionAddress {
        self.lock().session.clone()
    }

    /// The active address, `local_part@domain`.
    pub fn address(&self) -> String {
        self.lock().session.address()
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.lock();
        Snapshot {
            session: state.session.clone(),
            catalog: state.catalog.clone(),
            inbox: state.inbox.clone(),
            detail: state.detail.clone(),
            copy_label: self.copy_button.label(),
        }
    }

    /// Dispatch one command to its handler.
    ///
    /// Network failures end up in the views. The only error returned is a failed
    /// clipboard write for [`Command::CopyAddress`], whose label feedback still runs.
    pub async fn handle(&self, command: Command) -> Result<()> {
        match command {
            Command::LoadDomains => self.load_domains().await,
            Command::SelectDomain(domain) => {
                self.select_domain(&domain);
            }
            Command::Refresh => {
                self.refresh().await;
            }
            Command::OpenMessage(id) => {
                self.open_message(&id).await;
            }
            Command::CloseMessage => self.close_message(),
            Command::CopyAddress => {
                let (_revert, result) = self.copy_address().await;
                return result;
            }
        }
        Ok(())
    }

    /// Load the domain catalog, then run the initial inbox sync.
    pub async fn load_domains(&self) {
        self.load_catalog().await;
        self.refresh().await;
    }

    /// Load only the domain catalog. Returns the catalog state afterwards.
    pub async fn load_catalog(&self) -> CatalogState {
        let result = self.client.list_domains().await;
        let mut state = self.lock();
        let current = state.session.domain().to_string();
        state.catalog = CatalogState::from_result(result, &current);
        if let CatalogState::Loaded(catalog) = &state.catalog {
            info!(domains = catalog.options().len(), "domain catalog loaded");
        }
        state.catalog.clone()
    }

    /// Switch to `domain`, keeping the local-part. Returns the new address.
    ///
    /// The message list belonged to the previous address, so it is reset and any
    /// sync still in flight for it is discarded.
    pub fn select_domain(&self, domain: &str) -> String {
        let mut state = self.lock();
        state.session = state.session.with_domain(domain);
        state.catalog.select(domain);
        self.inbox_fence.issue();
        state.inbox = InboxView::Idle;
        let address = state.session.address();
        info!(%address, "active address changed");
        address
    }

    /// Sync the message list for the active address. Returns the view afterwards.
    ///
    /// When another refresh (or a domain change) was issued while this one was in
    /// flight, its result is discarded.
    pub async fn refresh(&self) -> InboxView {
        let (ticket, address) = {
            let mut state = self.lock();
            let ticket = self.inbox_fence.issue();
            state.inbox = InboxView::Loading;
            (ticket, state.session.address())
        };

        let result = self.client.list_emails(&address, self.page_limit).await;

        let mut state = self.lock();
        if self.inbox_fence.is_current(ticket) {
            state.inbox = InboxView::from_result(result);
        } else {
            debug!(?ticket, %address, "discarding stale inbox response");
        }
        state.inbox.clone()
    }

    /// Open message `id` in the detail panel. Returns the panel afterwards.
    pub async fn open_message(&self, id: &str) -> DetailView {
        let ticket = {
            let mut state = self.lock();
            state.detail = DetailView::Loading { id: id.to_string() };
            self.detail_fence.issue()
        };

        let result = self.client.fetch_email(id).await;

        let mut state = self.lock();
        if self.detail_fence.is_current(ticket) {
            state.detail = DetailView::from_result(id, result);
        } else {
            debug!(?ticket, id, "discarding stale message response");
        }
        state.detail.clone()
    }

    /// Hide the detail panel; a fetch still in flight will not reopen it.
    pub fn close_message(&self) {
        let mut state = self.lock();
        self.detail_fence.issue();
        state.detail = DetailView::Hidden;
    }

    /// Copy the active address. See [`clipboard::copy_address`].
    pub async fn copy_address(&self) -> (JoinHandle<()>, Result<()>) {
        let address = self.address();
        clipboard::copy_address(Arc::clone(&self.clipboard), &self.copy_button, address).await
    }

    pub fn copy_label(&self) -> &'static str {
        self.copy_button.label()
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        // Handlers never panic while holding the lock, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
