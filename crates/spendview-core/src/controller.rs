use std::{cell::RefCell, rc::Rc};

use spendview_domain::{DerivedView, ExpenseRecord, FilterState, Surface};
use tracing::debug;

use crate::pipeline::derive_view;
use crate::store::{RecordStore, SubscriptionId};
use crate::time::{Clock, SystemClock};

/// Holds the latest snapshot and filter selections for one surface and
/// re-runs the pipeline lazily when either changes.
///
/// The only derived state kept is the memoized view of the last run; inputs
/// are replaced wholesale, never mutated in place.
pub struct RecomputeController<C = SystemClock> {
    surface: Surface,
    clock: C,
    records: Vec<ExpenseRecord>,
    filters: FilterState,
    loaded: bool,
    view: Option<DerivedView>,
    stale: bool,
    generation: u64,
}

impl<C: Clock> RecomputeController<C> {
    pub fn new(surface: Surface, clock: C) -> Self {
        Self {
            surface,
            clock,
            records: Vec::new(),
            filters: surface.default_filters(),
            loaded: false,
            view: None,
            stale: true,
            generation: 0,
        }
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self.stale = true;
        self
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// `true` until the first snapshot arrives.
    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    /// Number of pipeline runs so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn replace_snapshot(&mut self, records: Vec<ExpenseRecord>) {
        debug!(surface = %self.surface, records = records.len(), "snapshot received");
        self.records = records;
        self.loaded = true;
        self.stale = true;
    }

    /// Replaces the filter selections. Equal selections keep the memoized view.
    pub fn set_filters(&mut self, filters: FilterState) {
        if self.filters != filters {
            self.filters = filters;
            self.stale = true;
        }
    }

    pub fn update_filters<F>(&mut self, mutator: F)
    where
        F: FnOnce(&mut FilterState),
    {
        let mut next = self.filters.clone();
        mutator(&mut next);
        self.set_filters(next);
    }

    /// Moves to another surface, starting from that surface's default selections.
    pub fn switch_surface(&mut self, surface: Surface) {
        if self.surface != surface {
            self.surface = surface;
            self.filters = surface.default_filters();
            self.stale = true;
        }
    }

    /// Forces the next read to recompute, e.g. once the clock has moved on.
    pub fn refresh(&mut self) {
        self.stale = true;
    }

    /// Last computed view, without recomputing. `None` before the first read.
    pub fn last_view(&self) -> Option<&DerivedView> {
        self.view.as_ref()
    }

    /// Current view, recomputed first if any input changed since the last run.
    pub fn view(&mut self) -> &DerivedView {
        if self.stale || self.view.is_none() {
            let view = derive_view(self.surface, &self.records, &self.filters, self.clock.now());
            self.generation += 1;
            debug!(
                surface = %self.surface,
                visible = view.visible_count(),
                source = view.source_count,
                generation = self.generation,
                "derived view recomputed"
            );
            self.view = Some(view);
            self.stale = false;
        }
        self.view.get_or_insert_with(DerivedView::default)
    }
}

/// Feeds every snapshot `store` publishes into `controller`, starting with the current one.
///
/// The controller must not be borrowed while the store publishes.
pub fn attach<S, C>(store: &mut S, controller: &Rc<RefCell<RecomputeController<C>>>) -> SubscriptionId
where
    S: RecordStore + ?Sized,
    C: Clock + 'static,
{
    let target = Rc::clone(controller);
    store.subscribe(Box::new(move |snapshot: &[ExpenseRecord]| {
        target.borrow_mut().replace_snapshot(snapshot.to_vec());
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::time::FixedClock;
    use chrono::{TimeZone, Utc};
    use spendview_domain::{Category, ExpenseInput, SortKey, TimeWindow};

    fn clock() -> FixedClock {
        FixedClock::utc(Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap())
    }

    fn record(id: &str, amount: f64, day: u32) -> ExpenseRecord {
        ExpenseRecord::new(id, amount, Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap())
    }

    #[test]
    fn first_read_before_snapshot_is_empty() {
        let mut controller = RecomputeController::new(Surface::Dashboard, clock());
        assert!(controller.is_loading());
        assert!(controller.last_view().is_none());
        assert!(controller.view().is_empty());
        assert_eq!(controller.generation(), 1);
    }

    #[test]
    fn recomputes_only_when_inputs_change() {
        let mut controller = RecomputeController::new(Surface::Filters, clock());
        controller.replace_snapshot(vec![record("a", 10.0, 3), record("b", 20.0, 5)]);
        assert_eq!(controller.view().total(), 30.0);
        controller.view();
        assert_eq!(controller.generation(), 1);

        controller.set_filters(controller.filters().clone());
        controller.view();
        assert_eq!(controller.generation(), 1);

        controller.update_filters(|filters| filters.sort_key = SortKey::AmountAsc);
        let first = controller.view().visible_records[0].id.clone();
        assert_eq!(first, "a");
        assert_eq!(controller.generation(), 2);

        controller.refresh();
        controller.view();
        assert_eq!(controller.generation(), 3);
    }

    #[test]
    fn switching_surface_resets_selections() {
        let mut controller = RecomputeController::new(Surface::Filters, clock());
        controller.update_filters(|filters| filters.search_text = "bus".into());
        controller.switch_surface(Surface::Dashboard);
        assert_eq!(controller.filters().time_window, TimeWindow::Month);
        assert!(controller.filters().search_text.is_empty());
    }

    #[test]
    fn attached_controller_follows_store_changes() {
        let controller = Rc::new(RefCell::new(RecomputeController::new(Surface::Dashboard, clock())));
        let mut store = MemoryStore::with_records(vec![record("seed", 4.0, 10)]);
        attach(&mut store, &controller);
        assert!(!controller.borrow().is_loading());
        assert_eq!(controller.borrow_mut().view().total(), 4.0);

        store
            .add(ExpenseInput {
                amount: 6.0,
                category: Category::Bills,
                note: String::new(),
                date: Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap(),
            })
            .unwrap();
        let mut controller = controller.borrow_mut();
        let view = controller.view();
        assert_eq!(view.total(), 10.0);
        assert_eq!(view.visible_records[0].effective_category(), "Bills");
    }
}
