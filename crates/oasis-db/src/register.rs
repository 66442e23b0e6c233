//! # Register Service
//!
//! The aggregate root of Oasis POS: owns the core aggregates (catalog,
//! roster, ledger, admin gate), supplies the clock and fresh ids, and calls
//! the slice store after each committed mutation.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Every mutating operation                        │
//! │                                                                     │
//! │  1. Validate + mutate the in-memory core aggregate (synchronous,    │
//! │     run-to-completion; errors reported before anything changes)     │
//! │  2. Persist the touched slice(s), whole-value                       │
//! │       └── failure? warn!() and carry on - the in-memory state is    │
//! │           authoritative for the rest of the session                 │
//! │  3. Return the core result to the caller                            │
//! │                                                                     │
//! │  Gated operations insert step 0: verify the caller-supplied admin   │
//! │  code and fail with AdminCodeRejected before touching anything.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use oasis_core::closing::ClosingCalendar;
use oasis_core::error::{CoreError, CoreResult};
use oasis_core::id::uid;
use oasis_core::ledger::{ClosingSummary, Ledger, SaleDraft};
use oasis_core::money::Money;
use oasis_core::report::{render_history_report, report_file_name};
use oasis_core::types::{CatalogItem, Employee, EmployeeUsage, ItemKind, Sale};
use oasis_core::{AdminGate, Catalog, DailyClosing, Roster, DEFAULT_ADMIN_CODE};

use crate::slices::{slice, SliceStore};

// =============================================================================
// History Export
// =============================================================================

/// A rendered history report ready to hand to the user as a download.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryExport {
    /// Suggested artifact name, dated with the current local day.
    pub file_name: String,
    /// The full plain-text report.
    pub contents: String,
}

// =============================================================================
// Register Service
// =============================================================================

/// The register service.
///
/// One instance per running register. All operations are synchronous
/// state transitions on the owned core aggregates; only the persistence
/// calls are async.
#[derive(Debug)]
pub struct RegisterService {
    catalog: Catalog,
    roster: Roster,
    ledger: Ledger,
    gate: AdminGate,
    store: SliceStore,
}

impl RegisterService {
    /// Loads the register state from the store.
    ///
    /// Each slice is read once; a slice that is absent or unreadable falls
    /// back to its default (empty collection / closed register / the fixed
    /// default admin code) with a warning for the unreadable case. Loading
    /// never fails: a fresh or damaged store yields a usable register.
    pub async fn load(store: SliceStore) -> Self {
        let services: Vec<CatalogItem> = load_or(&store, slice::SERVICES, Vec::new).await;
        let products: Vec<CatalogItem> = load_or(&store, slice::PRODUCTS, Vec::new).await;
        let employees: Vec<Employee> = load_or(&store, slice::EMPLOYEES, Vec::new).await;
        let current: Vec<Sale> = load_or(&store, slice::CURRENT_SALES, Vec::new).await;
        let history: Vec<Sale> = load_or(&store, slice::SALES_HISTORY, Vec::new).await;
        let closings: Vec<DailyClosing> = load_or(&store, slice::DAILY_CLOSINGS, Vec::new).await;
        let is_open: bool = load_or(&store, slice::IS_REGISTER_OPEN, || false).await;
        let admin_code: String = load_or(&store, slice::ADMIN_CODE, || {
            DEFAULT_ADMIN_CODE.to_string()
        })
        .await;

        info!(
            services = services.len(),
            products = products.len(),
            employees = employees.len(),
            current_sales = current.len(),
            history_sales = history.len(),
            is_open,
            "Register state loaded"
        );

        RegisterService {
            catalog: Catalog::from_slices(services, products),
            roster: Roster::from_slice(employees),
            ledger: Ledger::from_parts(
                is_open,
                current,
                history,
                ClosingCalendar::from_slice(closings),
            ),
            gate: AdminGate::from_code(admin_code),
            store,
        }
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// Adds a service to the catalog.
    pub async fn add_service(&mut self, name: &str, price_cents: i64) -> CoreResult<CatalogItem> {
        let item = self.catalog.add_service(uid(), name, price_cents)?;
        debug!(id = %item.id, name = %item.name, "Service added");
        self.persist(slice::SERVICES, self.catalog.services()).await;
        Ok(item)
    }

    /// Adds a product to the catalog.
    pub async fn add_product(&mut self, name: &str, price_cents: i64) -> CoreResult<CatalogItem> {
        let item = self.catalog.add_product(uid(), name, price_cents)?;
        debug!(id = %item.id, name = %item.name, "Product added");
        self.persist(slice::PRODUCTS, self.catalog.products()).await;
        Ok(item)
    }

    /// Removes a catalog entry by id (idempotent).
    pub async fn remove_catalog_item(&mut self, id: &str) {
        match self.catalog.remove(id) {
            Some(item) => match item.kind {
                ItemKind::Service => {
                    self.persist(slice::SERVICES, self.catalog.services()).await;
                }
                ItemKind::Product => {
                    self.persist(slice::PRODUCTS, self.catalog.products()).await;
                }
            },
            None => debug!(id, "Catalog removal for unknown id ignored"),
        }
    }

    // -------------------------------------------------------------------------
    // Staff
    // -------------------------------------------------------------------------

    /// Adds an employee to the roster.
    pub async fn add_employee(&mut self, name: &str) -> CoreResult<Employee> {
        let employee = self.roster.add(uid(), name)?;
        debug!(id = %employee.id, name = %employee.name, "Employee added");
        self.persist(slice::EMPLOYEES, self.roster.employees()).await;
        Ok(employee)
    }

    /// Reports whether any sale, current or historical, references the
    /// employee. Front ends call this before [`Self::delete_employee`] to
    /// decide whether a confirmation prompt is needed.
    pub fn employee_usage(&self, id: &str) -> EmployeeUsage {
        self.ledger.employee_usage(id)
    }

    /// Removes an employee unconditionally (idempotent).
    ///
    /// Sales referencing the employee keep their dangling reference and
    /// render as the unknown placeholder from here on.
    pub async fn delete_employee(&mut self, id: &str) {
        if self.roster.remove(id).is_some() {
            self.persist(slice::EMPLOYEES, self.roster.employees()).await;
        }
    }

    // -------------------------------------------------------------------------
    // Register lifecycle
    // -------------------------------------------------------------------------

    /// Whether sales can currently be registered.
    pub fn is_open(&self) -> bool {
        self.ledger.is_open()
    }

    /// Opens the register (idempotent).
    pub async fn open_register(&mut self) {
        self.ledger.open_register();
        info!("Register opened");
        self.persist(slice::IS_REGISTER_OPEN, &true).await;
    }

    /// Registers a sale, assigning a fresh id and the current instant.
    pub async fn register_sale(&mut self, draft: SaleDraft) -> CoreResult<Sale> {
        let sale = self
            .ledger
            .register_sale(draft, &self.catalog, uid(), Utc::now())?;
        info!(sale_id = %sale.id, amount = %sale.amount(), "Sale registered");
        self.persist(slice::CURRENT_SALES, self.ledger.current_sales())
            .await;
        Ok(sale)
    }

    /// Removes a sale from the current session (idempotent).
    pub async fn delete_sale(&mut self, id: &str) {
        self.ledger.delete_sale(id);
        self.persist(slice::CURRENT_SALES, self.ledger.current_sales())
            .await;
    }

    /// The running session total.
    pub fn session_total(&self) -> Money {
        self.ledger.session_total()
    }

    /// Closes the register, archiving the session under today's local date.
    pub async fn close_register(&mut self) -> CoreResult<ClosingSummary> {
        let today = Local::now().date_naive();
        let summary = self.ledger.close_register(today)?;
        info!(
            date = %summary.date,
            sales = summary.sales_archived,
            total = %summary.total(),
            "Register closed"
        );

        self.persist(slice::SALES_HISTORY, self.ledger.history())
            .await;
        self.persist(slice::DAILY_CLOSINGS, self.ledger.closings().entries())
            .await;
        self.persist(slice::CURRENT_SALES, self.ledger.current_sales())
            .await;
        self.persist(slice::IS_REGISTER_OPEN, &false).await;

        Ok(summary)
    }

    // -------------------------------------------------------------------------
    // History (admin-gated)
    // -------------------------------------------------------------------------

    /// Removes one sale from the historical ledger, decrementing its day's
    /// closing total.
    ///
    /// ## Errors
    /// [`CoreError::AdminCodeRejected`] when the supplied code does not
    /// verify; nothing is mutated in that case.
    pub async fn delete_history_sale(&mut self, admin_code: &str, id: &str) -> CoreResult<Option<Sale>> {
        if !self.gate.verify(admin_code) {
            warn!(sale_id = id, "History deletion rejected: bad admin code");
            return Err(CoreError::AdminCodeRejected);
        }

        let removed = self.ledger.delete_history_sale(id);
        if let Some(sale) = &removed {
            info!(sale_id = %sale.id, amount = %sale.amount(), "History sale deleted");
            self.persist(slice::SALES_HISTORY, self.ledger.history())
                .await;
            self.persist(slice::DAILY_CLOSINGS, self.ledger.closings().entries())
                .await;
        }
        Ok(removed)
    }

    /// Clears the closing calendar and the full sales history, together.
    ///
    /// ## Errors
    /// [`CoreError::AdminCodeRejected`] when the supplied code does not
    /// verify; nothing is mutated in that case.
    pub async fn reset_monthly_ledger(&mut self, admin_code: &str) -> CoreResult<()> {
        if !self.gate.verify(admin_code) {
            warn!("Calendar reset rejected: bad admin code");
            return Err(CoreError::AdminCodeRejected);
        }

        self.ledger.reset_monthly_ledger();
        info!("Closing calendar and sales history reset");

        self.persist(slice::SALES_HISTORY, self.ledger.history())
            .await;
        self.persist(slice::DAILY_CLOSINGS, self.ledger.closings().entries())
            .await;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Admin code
    // -------------------------------------------------------------------------

    /// Exact-match verification of a candidate admin code.
    pub fn verify_admin_code(&self, candidate: &str) -> bool {
        self.gate.verify(candidate)
    }

    /// Changes the admin code (confirmation must match, minimum length).
    pub async fn change_admin_code(&mut self, new_code: &str, confirm_code: &str) -> CoreResult<()> {
        self.gate.change_code(new_code, confirm_code)?;
        info!("Admin code changed");
        self.persist(slice::ADMIN_CODE, self.gate.code()).await;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reporting / read access
    // -------------------------------------------------------------------------

    /// Renders the downloadable history report, named with today's date.
    pub fn export_history(&self) -> HistoryExport {
        let now = Local::now();
        HistoryExport {
            file_name: report_file_name(now.date_naive()),
            contents: render_history_report(self.ledger.history(), &self.roster, now),
        }
    }

    /// The service catalog slice.
    pub fn services(&self) -> &[CatalogItem] {
        self.catalog.services()
    }

    /// The product catalog slice.
    pub fn products(&self) -> &[CatalogItem] {
        self.catalog.products()
    }

    /// The employee roster.
    pub fn employees(&self) -> &[Employee] {
        self.roster.employees()
    }

    /// The current-session sales.
    pub fn current_sales(&self) -> &[Sale] {
        self.ledger.current_sales()
    }

    /// The historical ledger.
    pub fn history(&self) -> &[Sale] {
        self.ledger.history()
    }

    /// The daily closing entries.
    pub fn daily_closings(&self) -> &[DailyClosing] {
        self.ledger.closings().entries()
    }

    /// Total of all closings in the given month (calendar view).
    pub fn month_total(&self, year: i32, month: u32) -> Money {
        self.ledger.closings().month_total(year, month)
    }

    // -------------------------------------------------------------------------
    // Persistence plumbing
    // -------------------------------------------------------------------------

    /// Saves one slice, downgrading failure to a warning.
    ///
    /// Durability is best effort: the mutation already committed in memory,
    /// and the register must stay usable for the rest of the session even
    /// when storage misbehaves.
    async fn persist<T: Serialize + ?Sized>(&self, name: &str, value: &T) {
        if let Err(err) = self.store.save(name, value).await {
            warn!(slice = name, error = %err, "Failed to persist state slice; continuing with in-memory state");
        }
    }
}

/// Loads one slice, falling back to `default` when the slice is absent or
/// unreadable. Unreadable slices are logged: silently resetting state is
/// acceptable, losing the reason is not.
async fn load_or<T, F>(store: &SliceStore, name: &str, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.load(name).await {
        Ok(Some(value)) => value,
        Ok(None) => default(),
        Err(err) => {
            warn!(slice = name, error = %err, "Failed to load state slice; using default");
            default()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
