//! The search lifecycle: locate-or-geocode, query, enrich, settle.
//!
//! Commands take `&self` and may overlap. Each one reserves a sequence
//! number, and a state write only lands while that number is still the
//! latest issued, so a slow earlier search can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use courtfinder_core::{
    clamp_desired_count, AppConfig, Coordinates, CourtType, LocationGroup, SearchFilters,
    SearchViewState, DEFAULT_CENTER,
};
use futures::future::join_all;
use tokio::sync::watch;

use crate::error::SearchError;
use crate::location::LocationProvider;
use crate::services::{CourtSearch, Geocoder};
use crate::warnings;

#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    pub default_center: Coordinates,
    pub default_filters: SearchFilters,
}

impl OrchestratorConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            default_center: config.default_center,
            default_filters: SearchFilters {
                desired_count: clamp_desired_count(config.default_count),
                ..SearchFilters::default()
            },
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_filters: SearchFilters::default(),
        }
    }
}

/// Input to [`SearchOrchestrator::search`].
///
/// When `origin_override` is present it wins over `address_text`, which is
/// then only kept for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub address_text: String,
    pub origin_override: Option<Coordinates>,
    pub filters: SearchFilters,
}

impl SearchRequest {
    /// Search around whatever `address_text` geocodes to.
    #[must_use]
    pub fn address(address_text: impl Into<String>, filters: SearchFilters) -> Self {
        Self {
            address_text: address_text.into(),
            origin_override: None,
            filters,
        }
    }

    /// Search around a known point, skipping forward geocoding.
    #[must_use]
    pub fn at(origin: Coordinates, filters: SearchFilters) -> Self {
        Self {
            address_text: String::new(),
            origin_override: Some(origin),
            filters,
        }
    }
}

/// Form state owned by the orchestrator between commands.
#[derive(Debug, Clone)]
struct Session {
    filters: SearchFilters,
    /// Latest search requested, whether or not it has settled.
    last_request: Option<RequestedSearch>,
}

#[derive(Debug, Clone)]
struct RequestedSearch {
    seq: u64,
    address_text: String,
    /// Set once this request has an origin, either supplied or geocoded.
    origin: Option<Coordinates>,
}

pub struct SearchOrchestrator {
    geocoder: Arc<dyn Geocoder>,
    location: Arc<dyn LocationProvider>,
    courts: Arc<dyn CourtSearch>,
    config: OrchestratorConfig,
    state: watch::Sender<SearchViewState>,
    session: Mutex<Session>,
    latest_seq: AtomicU64,
}

impl SearchOrchestrator {
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        location: Arc<dyn LocationProvider>,
        courts: Arc<dyn CourtSearch>,
        config: OrchestratorConfig,
    ) -> Self {
        let (state, _) = watch::channel(SearchViewState::initial(config.default_center));
        let session = Session {
            filters: config.default_filters.clone().normalized(),
            last_request: None,
        };
        Self {
            geocoder,
            location,
            courts,
            config,
            state,
            session: Mutex::new(session),
            latest_seq: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current view state.
    #[must_use]
    pub fn state(&self) -> SearchViewState {
        self.state.borrow().clone()
    }

    /// Change-notified view of the state for the presentation layer.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchViewState> {
        self.state.subscribe()
    }

    /// Filters the next search will use unless the caller passes its own.
    #[must_use]
    pub fn filters(&self) -> SearchFilters {
        self.session().filters.clone()
    }

    /// Runs a full search: resolve origin, query, enrich, settle.
    pub async fn search(&self, request: SearchRequest) {
        let seq = self.begin();
        self.execute(seq, request, None).await;
    }

    /// Searches around the device position.
    ///
    /// On a location failure only a warning is set and nothing else is
    /// called. Otherwise the map re-centres, the address input is filled by
    /// reverse geocoding (a failure there is a milder warning, not an
    /// abort), and a search runs at the known point without re-geocoding.
    pub async fn locate_me(&self) {
        let seq = self.begin();
        self.update_if_current(seq, |s| {
            s.is_loading = true;
            s.warning_message = None;
        });

        let point = match self.location.current_position().await {
            Ok(point) => point,
            Err(err) => {
                tracing::info!(seq, error = %err, "location request failed");
                let warning = warnings::warning_for(&SearchError::from(err));
                self.update_if_current(seq, |s| {
                    s.is_loading = false;
                    s.warning_message = Some(warning);
                });
                return;
            }
        };

        if !self.update_if_current(seq, |s| s.map_center = point) {
            tracing::debug!(seq, "locate superseded before reverse geocoding");
            return;
        }

        let (address_text, carried_warning) = match self.geocoder.reverse_geocode(point).await {
            Ok(address) if !address.is_empty() => (address, None),
            Ok(_) => (
                String::new(),
                Some(warnings::LOCATED_WITHOUT_ADDRESS.to_owned()),
            ),
            Err(err) => {
                tracing::warn!(seq, %point, error = %err, "reverse geocoding own position failed");
                (
                    String::new(),
                    Some(warnings::LOCATED_WITHOUT_ADDRESS.to_owned()),
                )
            }
        };

        if !address_text.is_empty() {
            let text = address_text.clone();
            self.update_if_current(seq, |s| s.address_text = text);
        }

        let request = SearchRequest {
            address_text,
            origin_override: Some(point),
            filters: self.filters(),
        };
        self.execute(seq, request, carried_warning).await;
    }

    /// Resets filters and view state to their initial values and discards
    /// any in-flight command.
    pub fn clear(&self) {
        self.begin();
        {
            let mut session = self.session();
            session.filters = self.config.default_filters.clone().normalized();
            session.last_request = None;
        }
        let initial = SearchViewState::initial(self.config.default_center);
        self.state.send_if_modified(|s| {
            if *s == initial {
                false
            } else {
                *s = initial;
                true
            }
        });
    }

    /// Live filter: sets the court type and re-runs the latest requested
    /// search with the updated filters. Its origin is reused when that
    /// request already resolved one; otherwise its address is geocoded again.
    pub async fn set_court_type(&self, court_type: CourtType) {
        let rerun = {
            let mut session = self.session();
            session.filters.court_type = court_type;
            let filters = session.filters.clone();
            session.last_request.clone().map(|last| SearchRequest {
                address_text: last.address_text,
                origin_override: last.origin,
                filters,
            })
        };

        if let Some(request) = rerun {
            tracing::debug!(%court_type, "court type changed, re-running last search");
            self.search(request).await;
        }
    }

    /// Applies on the next explicit search.
    pub fn set_surface_text(&self, surface_text: impl Into<String>) {
        self.session().filters.surface_text = surface_text.into();
    }

    /// Applies on the next explicit search.
    pub fn set_lighting_only(&self, lighting_only: bool) {
        self.session().filters.lighting_only = lighting_only;
    }

    /// Applies on the next explicit search.
    pub fn set_exclude_mixed_locations(&self, exclude: bool) {
        self.session().filters.exclude_mixed_locations = exclude;
    }

    /// Applies on the next explicit search; clamped into the accepted range.
    pub fn set_desired_count(&self, count: u32) {
        self.session().filters.desired_count = clamp_desired_count(count);
    }

    /// Mirrors the address input without searching.
    pub fn set_address_text(&self, address_text: impl Into<String>) {
        let text = address_text.into();
        self.state.send_if_modified(|s| {
            if s.address_text == text {
                false
            } else {
                s.address_text = text;
                true
            }
        });
    }

    pub fn dismiss_warning(&self) {
        self.state
            .send_if_modified(|s| s.warning_message.take().is_some());
    }

    async fn execute(&self, seq: u64, request: SearchRequest, carried_warning: Option<String>) {
        let filters = request.filters.clone().normalized();
        {
            let mut session = self.session();
            session.filters = filters.clone();
            session.last_request = Some(RequestedSearch {
                seq,
                address_text: request.address_text.clone(),
                origin: request.origin_override,
            });
        }

        self.update_if_current(seq, |s| {
            s.is_loading = true;
            s.warning_message = None;
        });

        let origin = match request.origin_override {
            Some(origin) => origin,
            None => match self.geocoder.forward_geocode(&request.address_text).await {
                Ok(origin) => origin,
                Err(err) => {
                    self.settle_failure(seq, &err);
                    return;
                }
            },
        };

        if !self.update_if_current(seq, |s| s.map_center = origin) {
            tracing::debug!(seq, "search superseded after resolving origin");
            return;
        }
        if let Some(last) = self.session().last_request.as_mut() {
            if last.seq == seq {
                last.origin = Some(origin);
            }
        }

        let groups: Vec<LocationGroup> = match self.courts.find_closest(origin, &filters).await {
            Ok(groups) => groups
                .into_iter()
                .filter(|group| group.court_count() > 0)
                .collect(),
            Err(err) => {
                self.settle_failure(seq, &err);
                return;
            }
        };

        if groups.is_empty() {
            let settled = self.update_if_current(seq, |s| {
                s.is_loading = false;
                s.has_searched = true;
                s.result_groups.clear();
                s.warning_message = Some(warnings::NO_RESULTS.to_owned());
            });
            if settled {
                tracing::info!(seq, %origin, "search settled with no matches");
            }
            return;
        }

        if !self.is_current(seq) {
            tracing::debug!(seq, "search superseded before enrichment");
            return;
        }

        let groups = self.enrich(groups).await;
        let court_count: usize = groups.iter().map(LocationGroup::court_count).sum();
        let requested = usize::try_from(filters.desired_count).unwrap_or(usize::MAX);
        let warning = if court_count < requested {
            Some(warnings::fewer_than_requested(court_count))
        } else {
            carried_warning
        };

        let group_count = groups.len();
        let settled = self.update_if_current(seq, |s| {
            s.is_loading = false;
            s.has_searched = true;
            s.result_groups = groups;
            s.warning_message = warning;
        });
        if settled {
            tracing::info!(
                seq,
                %origin,
                groups = group_count,
                courts = court_count,
                "search settled"
            );
        } else {
            tracing::debug!(seq, "search superseded, discarding results");
        }
    }

    /// Attaches a reverse-geocoded address to every group. Lookups run
    /// concurrently and are reassembled by index; each failure degrades to
    /// no address without affecting the others.
    async fn enrich(&self, groups: Vec<LocationGroup>) -> Vec<LocationGroup> {
        let geocoder = &self.geocoder;
        let lookups = groups.iter().map(|group| {
            let point = group.coordinates;
            async move {
                match geocoder.reverse_geocode(point).await {
                    Ok(address) => address,
                    Err(err) => {
                        tracing::warn!(%point, error = %err, "group enrichment failed");
                        String::new()
                    }
                }
            }
        });
        let addresses = join_all(lookups).await;

        groups
            .into_iter()
            .zip(addresses)
            .map(|(mut group, address)| {
                group.resolved_address = (!address.is_empty()).then_some(address);
                group
            })
            .collect()
    }

    /// Clears results and shows the failure as a warning. The map centre is
    /// left where it was.
    fn settle_failure(&self, seq: u64, err: &SearchError) {
        let warning = warnings::warning_for(err);
        let settled = self.update_if_current(seq, |s| {
            s.is_loading = false;
            s.has_searched = true;
            s.result_groups.clear();
            s.warning_message = Some(warning);
        });
        if settled {
            tracing::info!(seq, error = %err, "search failed");
        }
    }

    fn begin(&self) -> u64 {
        self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, seq: u64) -> bool {
        self.latest_seq.load(Ordering::SeqCst) == seq
    }

    /// Applies `update` only while `seq` is the latest command. Returns
    /// whether it was applied.
    fn update_if_current(&self, seq: u64, update: impl FnOnce(&mut SearchViewState)) -> bool {
        let mut applied = false;
        self.state.send_if_modified(|s| {
            if self.is_current(seq) {
                update(s);
                applied = true;
            }
            applied
        });
        applied
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
