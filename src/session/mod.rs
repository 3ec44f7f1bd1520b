//! Provider session and fetch sequencing
//!
//! A [`Session`] owns the selected provider, the per-provider token memo and
//! everything fetched for the current selection. Failures never escape a
//! stage: each one is logged and queued as a dismissible [`ErrorEntry`].
//!
//! Every provider selection issues a new [`Ticket`]. Stage results are only
//! applied while their ticket is current, so a result for a provider the
//! operator has already left is dropped instead of overwriting newer state.

mod errors;
mod tokens;

pub use errors::{ErrorEntry, ErrorQueue};
pub use tokens::TokenRegistry;

use crate::api::HrApi;
use crate::error::{ApiError, ApiResult};
use crate::models::{rows_from_raw, CompanyProfile, DirectoryRow, EmployeeDetail, Provider};

pub const TOKEN_ERROR: &str = "Error fetching provider token";
pub const COMPANY_UNSUPPORTED: &str = "This provider does not support the Company API";
pub const COMPANY_ERROR: &str = "Error fetching provider company";
pub const DIRECTORY_ERROR: &str = "Error fetching provider directory";
pub const DETAIL_ERROR: &str = "Error fetching employee details";

/// Identifies one provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    provider: Provider,
    generation: u64,
}

impl Ticket {
    pub fn provider(&self) -> Provider {
        self.provider
    }
}

/// Which reads are in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Loading {
    pub company: bool,
    pub directory: bool,
    pub employee: bool,
}

impl Loading {
    /// What is being loaded, for an indicator. `None` when idle.
    pub fn label(&self) -> Option<&'static str> {
        if self.company {
            Some("company profile")
        } else if self.directory {
            Some("directory")
        } else if self.employee {
            Some("employee details")
        } else {
            None
        }
    }
}

/// Called with the new flags each time a read starts or finishes.
pub type LoadingObserver = Box<dyn FnMut(Loading)>;

pub struct Session<A> {
    api: A,
    tokens: TokenRegistry,
    current: Option<Ticket>,
    generation: u64,
    company: Option<CompanyProfile>,
    directory: Option<Vec<DirectoryRow>>,
    employee: Option<EmployeeDetail>,
    loading: Loading,
    on_loading: Option<LoadingObserver>,
    errors: ErrorQueue,
}

impl<A: HrApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tokens: TokenRegistry::new(),
            current: None,
            generation: 0,
            company: None,
            directory: None,
            employee: None,
            loading: Loading::default(),
            on_loading: None,
            errors: ErrorQueue::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn selected_provider(&self) -> Option<Provider> {
        self.current.map(|t| t.provider)
    }

    pub fn current_ticket(&self) -> Option<Ticket> {
        self.current
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current == Some(ticket)
    }

    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }

    pub fn company(&self) -> Option<&CompanyProfile> {
        self.company.as_ref()
    }

    pub fn directory(&self) -> Option<&[DirectoryRow]> {
        self.directory.as_deref()
    }

    pub fn employee(&self) -> Option<&EmployeeDetail> {
        self.employee.as_ref()
    }

    /// Close the detail view.
    pub fn close_employee(&mut self) {
        self.employee = None;
    }

    pub fn loading(&self) -> Loading {
        self.loading
    }

    /// Report loading changes to `observer`, replacing any previous one.
    pub fn on_loading(&mut self, observer: impl FnMut(Loading) + 'static) {
        self.on_loading = Some(Box::new(observer));
    }

    fn set_loading(&mut self, update: impl FnOnce(&mut Loading)) {
        update(&mut self.loading);
        if let Some(observer) = self.on_loading.as_mut() {
            observer(self.loading);
        }
    }

    pub fn errors(&self) -> &ErrorQueue {
        &self.errors
    }

    pub fn dismiss_error(&mut self, id: uuid::Uuid) -> bool {
        self.errors.dismiss(id)
    }

    /// Record a new selection and invalidate results from earlier ones.
    ///
    /// Everything shown for the previous provider is cleared.
    pub fn begin_selection(&mut self, provider: Provider) -> Ticket {
        self.generation += 1;
        let ticket = Ticket {
            provider,
            generation: self.generation,
        };
        self.current = Some(ticket);
        self.company = None;
        self.directory = None;
        self.employee = None;
        ticket
    }

    /// Return the memoized token for `provider`, creating a sandbox connection
    /// the first time it is needed.
    pub fn get_or_fetch_token(&mut self, provider: Provider) -> ApiResult<String> {
        if let Some(token) = self.tokens.token(provider) {
            tracing::debug!(provider = provider.as_str(), "Reusing sandbox token");
            return Ok(token.to_string());
        }

        let token = self.api.create_sandbox(provider)?;
        tracing::info!(provider = provider.as_str(), "Sandbox token created");
        Ok(self.tokens.store(provider, token).to_string())
    }

    /// Fetch and store the company profile. Returns true if a profile was stored.
    pub fn fetch_company_profile(&mut self, ticket: Ticket, token: &str) -> bool {
        self.set_loading(|l| l.company = true);
        let result = self.api.company(token).and_then(|raw| {
            CompanyProfile::from_raw(raw).ok_or(ApiError::MissingCompanyId)
        });
        self.set_loading(|l| l.company = false);

        if !self.is_current(ticket) {
            tracing::debug!(provider = ticket.provider.as_str(), "Dropping stale company response");
            return false;
        }

        match result {
            Ok(profile) => {
                tracing::info!(company_id = %profile.id, "Company profile loaded");
                self.company = Some(profile);
                true
            }
            Err(err) if err.is_not_implemented() => {
                tracing::warn!(provider = ticket.provider.as_str(), "Company API not supported");
                self.company = None;
                self.errors.push(COMPANY_UNSUPPORTED);
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "Company fetch failed");
                self.errors.push(COMPANY_ERROR);
                false
            }
        }
    }

    /// Fetch and store the directory. On failure the previous directory is kept.
    pub fn fetch_directory(&mut self, ticket: Ticket, token: &str) -> bool {
        self.set_loading(|l| l.directory = true);
        let result = self.api.directory(token).map(rows_from_raw);
        self.set_loading(|l| l.directory = false);

        if !self.is_current(ticket) {
            tracing::debug!(provider = ticket.provider.as_str(), "Dropping stale directory response");
            return false;
        }

        match result {
            Ok(rows) => {
                tracing::info!(count = rows.len(), "Directory loaded");
                self.directory = Some(rows);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Directory fetch failed");
                self.errors.push(DIRECTORY_ERROR);
                false
            }
        }
    }

    /// Fetch one individual's detail. Returns true if the detail view should open.
    pub fn fetch_employee_detail(&mut self, ticket: Ticket, token: &str, employee_id: &str) -> bool {
        self.employee = None;
        self.set_loading(|l| l.employee = true);
        let result = self
            .api
            .individuals(token, &[employee_id])
            .and_then(|batch| {
                EmployeeDetail::from_batch(batch, employee_id).ok_or(ApiError::EmptyResponse)
            });
        self.set_loading(|l| l.employee = false);

        if !self.is_current(ticket) {
            tracing::debug!(employee_id, "Dropping stale employee response");
            return false;
        }

        match result {
            Ok(detail) => {
                tracing::info!(employee_id, "Employee detail loaded");
                self.employee = Some(detail);
                true
            }
            Err(err) => {
                tracing::warn!(employee_id, error = %err, "Employee detail fetch failed");
                self.errors.push(DETAIL_ERROR);
                false
            }
        }
    }

    /// Select a provider: token, then company, then directory.
    ///
    /// The directory is fetched whatever happened to the company read, since
    /// providers may support one endpoint and not the other.
    pub fn select_provider(&mut self, provider: Provider) -> Ticket {
        match self.open_provider(provider) {
            Ok((ticket, token)) => {
                self.fetch_company_profile(ticket, &token);
                self.fetch_directory(ticket, &token);
                ticket
            }
            Err(ticket) => ticket,
        }
    }

    /// Begin a selection and obtain its token, without fetching anything else.
    ///
    /// On token failure the error is queued and the ticket is returned as the
    /// error value so callers can still tell which selection failed.
    pub fn open_provider(&mut self, provider: Provider) -> Result<(Ticket, String), Ticket> {
        let ticket = self.begin_selection(provider);

        match self.get_or_fetch_token(provider) {
            Ok(token) => Ok((ticket, token)),
            Err(err) => {
                tracing::warn!(provider = provider.as_str(), error = %err, "Token fetch failed");
                self.errors.push(TOKEN_ERROR);
                Err(ticket)
            }
        }
    }

    /// Open the detail view for a directory row.
    ///
    /// Needs a selected provider and a non-empty id; otherwise an error is
    /// queued without any request. Returns true if the detail view should open.
    pub fn select_employee(&mut self, employee_id: Option<&str>) -> bool {
        let employee_id = employee_id.map(str::trim).filter(|id| !id.is_empty());
        let (Some(ticket), Some(employee_id)) = (self.current, employee_id) else {
            tracing::warn!("Employee selected without a provider or id");
            self.errors.push(DETAIL_ERROR);
            return false;
        };

        let token = match self.get_or_fetch_token(ticket.provider) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "Token fetch failed");
                self.errors.push(DETAIL_ERROR);
                return false;
            }
        };

        self.fetch_employee_detail(ticket, &token, employee_id)
    }
}
