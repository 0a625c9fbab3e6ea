//! Year / half-year date filter picker.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use super::page::{OutsideClickListener, PageHost};
use crate::models::HalfYear;

/// Earliest year offered by default (the archive started in June 1995).
pub const DEFAULT_EARLIEST_YEAR: i32 = 1995;

/// Viewport width, in CSS pixels, from which the picker opens on hover.
pub const HOVER_BREAKPOINT_PX: u32 = 640;

/// How the picker opens and closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Hover,
    Click,
}

impl InteractionMode {
    pub fn for_viewport(width_px: u32) -> Self {
        if width_px >= HOVER_BREAKPOINT_PX {
            InteractionMode::Hover
        } else {
            InteractionMode::Click
        }
    }
}

/// One half-year button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfOption {
    pub half: HalfYear,
    pub start_date: NaiveDate,
    pub disabled: bool,
}

impl HalfOption {
    pub fn label(&self) -> &'static str {
        self.half.label()
    }
}

/// One year row of the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRow {
    pub year: i32,
    pub halves: [HalfOption; 2],
}

pub struct DateFilter {
    earliest_year: i32,
    today: NaiveDate,
    mode: InteractionMode,
    page: Arc<dyn PageHost>,
    listener: Option<OutsideClickListener>,
    selected: Option<NaiveDate>,
}

impl DateFilter {
    pub fn new(
        earliest_year: i32,
        today: NaiveDate,
        mode: InteractionMode,
        page: Arc<dyn PageHost>,
    ) -> Self {
        Self {
            earliest_year: earliest_year.min(today.year()),
            today,
            mode,
            page,
            listener: None,
            selected: None,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Switch interaction mode, e.g. after a viewport resize.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    pub fn is_open(&self) -> bool {
        self.listener.is_some()
    }

    /// Start date of the last accepted selection.
    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// A half is disabled when it starts strictly after the current month.
    pub fn is_disabled(&self, year: i32, half: HalfYear) -> bool {
        (year, half.start_month()) > (self.today.year(), self.today.month())
    }

    fn option(&self, year: i32, half: HalfYear) -> Option<HalfOption> {
        if year < self.earliest_year || year > self.today.year() {
            return None;
        }
        Some(HalfOption {
            half,
            start_date: half.start_date(year)?,
            disabled: self.is_disabled(year, half),
        })
    }

    /// All selectable years, newest first.
    pub fn rows(&self) -> Vec<YearRow> {
        (self.earliest_year..=self.today.year())
            .rev()
            .filter_map(|year| {
                Some(YearRow {
                    year,
                    halves: [
                        self.option(year, HalfYear::First)?,
                        self.option(year, HalfYear::Second)?,
                    ],
                })
            })
            .collect()
    }

    /// Select a period. Disabled or unknown periods are ignored and leave the
    /// picker as it was; otherwise `on_select` receives the start date and the
    /// picker closes. Returns whether the selection was accepted.
    pub fn select<F>(&mut self, year: i32, half: HalfYear, on_select: F) -> bool
    where
        F: FnOnce(NaiveDate),
    {
        let Some(option) = self.option(year, half) else {
            return false;
        };
        if option.disabled {
            return false;
        }

        self.selected = Some(option.start_date);
        on_select(option.start_date);
        self.close();
        true
    }

    pub fn open(&mut self) {
        if self.listener.is_none() {
            self.listener = Some(OutsideClickListener::register(self.page.clone()));
        }
    }

    pub fn close(&mut self) {
        self.listener = None;
    }

    pub fn pointer_enter(&mut self) {
        if self.mode == InteractionMode::Hover {
            self.open();
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.mode == InteractionMode::Hover {
            self.close();
        }
    }

    /// Trigger button click.
    pub fn toggle(&mut self) {
        if self.mode != InteractionMode::Click {
            return;
        }
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn outside_click(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::page::MemoryPage;

    fn make_filter(today: &str, mode: InteractionMode) -> (DateFilter, Arc<MemoryPage>) {
        let page = Arc::new(MemoryPage::new());
        let filter = DateFilter::new(2020, today.parse().unwrap(), mode, page.clone());
        (filter, page)
    }

    #[test]
    fn test_rows_newest_first() {
        let (filter, _) = make_filter("2024-03-15", InteractionMode::Click);
        let years: Vec<i32> = filter.rows().iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2024, 2023, 2022, 2021, 2020]);
    }

    #[test]
    fn test_future_half_disabled() {
        let (filter, _) = make_filter("2024-03-15", InteractionMode::Click);
        let rows = filter.rows();
        let current = &rows[0];
        assert!(!current.halves[0].disabled);
        assert!(current.halves[1].disabled);
        assert_eq!(current.halves[1].label(), "Jul–Dec");

        let (filter, _) = make_filter("2024-07-01", InteractionMode::Click);
        assert!(!filter.rows()[0].halves[1].disabled);
    }

    #[test]
    fn test_disabled_selection_is_ignored() {
        let (mut filter, _page) = make_filter("2024-03-15", InteractionMode::Click);
        filter.toggle();
        let mut fired = None;

        assert!(!filter.select(2024, HalfYear::Second, |d| fired = Some(d)));
        assert!(fired.is_none());
        assert!(filter.is_open());
        assert!(filter.selected().is_none());
    }

    #[test]
    fn test_out_of_range_year_is_ignored() {
        let (mut filter, _page) = make_filter("2024-03-15", InteractionMode::Click);
        assert!(!filter.select(2019, HalfYear::First, |_| panic!("must not fire")));
        assert!(!filter.select(2025, HalfYear::First, |_| panic!("must not fire")));
    }

    #[test]
    fn test_select_reports_start_and_closes() {
        let (mut filter, page) = make_filter("2024-03-15", InteractionMode::Click);
        filter.toggle();
        assert_eq!(page.listener_count(), 1);

        let mut fired = None;
        assert!(filter.select(2022, HalfYear::Second, |d| fired = Some(d)));
        assert_eq!(fired, Some("2022-07-01".parse().unwrap()));
        assert!(!filter.is_open());
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn test_hover_mode() {
        let (mut filter, _page) = make_filter("2024-03-15", InteractionMode::Hover);
        filter.toggle();
        assert!(!filter.is_open());
        filter.pointer_enter();
        assert!(filter.is_open());
        filter.pointer_leave();
        assert!(!filter.is_open());
    }

    #[test]
    fn test_click_mode_ignores_hover() {
        let (mut filter, _page) = make_filter("2024-03-15", InteractionMode::Click);
        filter.pointer_enter();
        assert!(!filter.is_open());
        filter.toggle();
        assert!(filter.is_open());
        filter.toggle();
        assert!(!filter.is_open());
    }

    #[test]
    fn test_outside_click_dismisses() {
        let (mut filter, page) = make_filter("2024-03-15", InteractionMode::Click);
        filter.toggle();
        filter.outside_click();
        assert!(!filter.is_open());
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn test_drop_releases_listener() {
        let page = Arc::new(MemoryPage::new());
        {
            let mut filter = DateFilter::new(
                DEFAULT_EARLIEST_YEAR,
                "2024-03-15".parse().unwrap(),
                InteractionMode::Hover,
                page.clone(),
            );
            filter.pointer_enter();
            filter.open();
            assert_eq!(page.listener_count(), 1);
        }
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn test_viewport_breakpoint() {
        assert_eq!(InteractionMode::for_viewport(1024), InteractionMode::Hover);
        assert_eq!(InteractionMode::for_viewport(640), InteractionMode::Hover);
        assert_eq!(InteractionMode::for_viewport(390), InteractionMode::Click);
    }

    #[test]
    fn test_set_mode_after_resize() {
        let (mut filter, _page) = make_filter("2024-03-15", InteractionMode::Hover);
        filter.set_mode(InteractionMode::for_viewport(390));
        assert_eq!(filter.mode(), InteractionMode::Click);

        filter.pointer_enter();
        assert!(!filter.is_open());
        filter.toggle();
        assert!(filter.is_open());
    }
}
