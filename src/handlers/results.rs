use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::client::ApiClient;
use crate::entities::flight::{FlightSummary, SearchPage};
use crate::error::{AppError, AppResult};
use crate::utils::pagination;
use crate::utils::query::{build_query, SearchCriteria, SearchFilters, SearchQuery, SortOption};
use crate::utils::sequence::{RequestSequence, RequestTicket};
use crate::{AppState, FlightSelection};

/// A query that has been issued a ticket and is ready to send.
#[derive(Debug, Clone)]
pub struct PendingSearch {
    pub ticket: RequestTicket,
    pub query: SearchQuery,
}

/// Results page state: live page/sort/filter inputs plus the last applied
/// response. Every input change yields a `PendingSearch`; filter and sort
/// changes start again from page 1.
#[derive(Debug)]
pub struct ResultsView {
    criteria: SearchCriteria,
    page_size: u32,
    current_page: u32,
    sort: SortOption,
    filters: SearchFilters,
    flights: Vec<FlightSummary>,
    total_pages: u32,
    total: u64,
    loading: bool,
    error: Option<String>,
    sequence: RequestSequence,
    pub show_filters_mobile: bool,
}

impl ResultsView {
    pub fn new(criteria: SearchCriteria, page_size: u32) -> Self {
        Self {
            criteria,
            page_size,
            current_page: 1,
            sort: SortOption::default(),
            filters: SearchFilters::default(),
            flights: Vec::new(),
            total_pages: 0,
            total: 0,
            loading: false,
            error: None,
            sequence: RequestSequence::new(),
            show_filters_mobile: false,
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn flights(&self) -> &[FlightSummary] {
        &self.flights
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Airlines present in the most recent result page, sorted.
    pub fn available_airlines(&self) -> Vec<String> {
        self.flights
            .iter()
            .map(|f| f.airline_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn page_buttons(&self) -> Vec<u32> {
        pagination::page_window(self.current_page, self.total_pages)
    }

    pub fn has_previous(&self) -> bool {
        pagination::has_previous(self.current_page)
    }

    pub fn has_next(&self) -> bool {
        pagination::has_next(self.current_page, self.total_pages)
    }

    /// Issue a ticket for the current inputs.
    pub fn dispatch(&mut self) -> AppResult<PendingSearch> {
        let query = build_query(
            &self.criteria,
            self.current_page,
            self.page_size,
            &self.filters,
            self.sort,
        )?;
        let ticket = self.sequence.issue();
        self.loading = true;
        self.error = None;
        Ok(PendingSearch { ticket, query })
    }

    /// Publish a response if its request is still the latest one issued.
    /// Returns whether the response was applied.
    pub fn apply(&mut self, ticket: RequestTicket, result: AppResult<SearchPage>) -> bool {
        if !self.sequence.is_current(ticket) {
            tracing::debug!(?ticket, "Dropping stale search response");
            return false;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                if page.page != self.current_page {
                    tracing::debug!(
                        requested = self.current_page,
                        served = page.page,
                        "Backend served a different page"
                    );
                }
                self.flights = page.flights;
                self.total_pages = page.total_pages;
                self.current_page = self.current_page.min(page.total_pages.max(1));
                self.total = page.total;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Flight search failed");
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// Dispatch, send and apply in one step.
    pub async fn refresh(&mut self, client: &ApiClient) -> AppResult<()> {
        let pending = self.dispatch()?;
        let result = client.search_flights(&pending.query).await;
        self.apply(pending.ticket, result);
        Ok(())
    }

    /// Move to `page`. Pages outside 1..=total_pages are refused and no
    /// request is produced.
    pub fn go_to_page(&mut self, page: u32) -> AppResult<PendingSearch> {
        if page < 1 || page > self.total_pages {
            tracing::debug!(page, total_pages = self.total_pages, "Page request refused");
            return Err(AppError::PageOutOfRange {
                requested: page,
                total_pages: self.total_pages,
            });
        }
        self.current_page = page;
        self.dispatch()
    }

    pub fn next_page(&mut self) -> AppResult<PendingSearch> {
        self.go_to_page(self.current_page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> AppResult<PendingSearch> {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    pub fn set_sort(&mut self, sort: SortOption) -> AppResult<PendingSearch> {
        self.sort = sort;
        self.current_page = 1;
        self.dispatch()
    }

    pub fn set_price_range(
        &mut self,
        min_price: Option<Decimal>,
        max_price: Option<Decimal>,
    ) -> AppResult<PendingSearch> {
        let next = SearchFilters {
            min_price,
            max_price,
            ..self.filters.clone()
        };
        next.validate_bounds()?;
        self.update_filters(next)
    }

    pub fn set_max_duration(&mut self, minutes: Option<u32>) -> AppResult<PendingSearch> {
        let next = SearchFilters {
            max_duration_minutes: minutes,
            ..self.filters.clone()
        };
        self.update_filters(next)
    }

    pub fn toggle_airline(&mut self, airline: &str, checked: bool) -> AppResult<PendingSearch> {
        let mut next = self.filters.clone();
        if checked {
            next.airlines.insert(airline.to_string());
        } else {
            next.airlines.remove(airline);
        }
        self.update_filters(next)
    }

    /// Reset filters and sort to their defaults.
    pub fn clear_all_filters(&mut self) -> AppResult<PendingSearch> {
        self.sort = SortOption::default();
        self.update_filters(SearchFilters::default())
    }

    fn update_filters(&mut self, filters: SearchFilters) -> AppResult<PendingSearch> {
        self.filters = filters;
        self.current_page = 1;
        self.dispatch()
    }

    /// Hand the chosen flight to the details view.
    pub fn select_flight(&self, state: &mut AppState, flight_id: i64) -> AppResult<FlightSelection> {
        let flight = self
            .flights
            .iter()
            .find(|f| f.id == flight_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Flight {} is not on this page", flight_id)))?;
        Ok(state.select_flight(flight, self.criteria.passengers).clone())
    }
}
