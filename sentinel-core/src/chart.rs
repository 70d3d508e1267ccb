use crate::counters::Counters;
use serde::Serialize;

pub const LABELS: [&str; 3] = ["Critical", "Warning", "Healthy"];
pub const COLORS: [&str; 3] = ["#ff3b6b", "#ffb020", "#a3e635"];

/// The three donut slices: critical, warning, healthy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChartDataset {
    pub crit: usize,
    pub warn: usize,
    pub healthy: usize,
}

impl ChartDataset {
    pub fn from_counts(crit: usize, warn: usize, total: usize) -> Self {
        Self::from(&Counters { crit, warn, total })
    }

    pub fn values(&self) -> [usize; 3] {
        [self.crit, self.warn, self.healthy]
    }
}

impl From<&Counters> for ChartDataset {
    fn from(c: &Counters) -> Self {
        Self {
            crit: c.crit,
            warn: c.warn,
            healthy: c.healthy(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("chart renderer unavailable: {0}")]
    Unavailable(String),
    #[error("chart render failed: {0}")]
    Render(String),
}

/// Drawing backend for the health donut.
pub trait ChartRenderer {
    type Handle;

    /// Build a new chart instance showing `dataset`.
    fn create(&self, dataset: &ChartDataset) -> Result<Self::Handle, ChartError>;

    /// Replace the data of an existing instance and redraw it in place.
    fn update(&self, handle: &Self::Handle, dataset: &ChartDataset) -> Result<(), ChartError>;
}

enum ChartState<H> {
    Uninitialized,
    Initialized(H),
}

/// Owns the single chart instance of a page session.
pub struct HealthChart<R: ChartRenderer> {
    renderer: R,
    state: ChartState<R::Handle>,
    dataset: Option<ChartDataset>,
}

impl<R: ChartRenderer> HealthChart<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            state: ChartState::Uninitialized,
            dataset: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, ChartState::Initialized(_))
    }

    /// Last dataset successfully handed to the renderer.
    pub fn dataset(&self) -> Option<ChartDataset> {
        self.dataset
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Create the chart on first use, otherwise update it in place. A failed
    /// creation leaves the chart uninitialized so the next call retries.
    pub fn update(&mut self, counters: &Counters) -> Result<ChartDataset, ChartError> {
        let dataset = ChartDataset::from(counters);
        match &self.state {
            ChartState::Uninitialized => {
                let handle = self.renderer.create(&dataset)?;
                self.state = ChartState::Initialized(handle);
            }
            ChartState::Initialized(handle) => self.renderer.update(handle, &dataset)?,
        }
        self.dataset = Some(dataset);
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct Recorder {
        available: Cell<bool>,
        created: Cell<usize>,
        drawn: RefCell<Vec<[usize; 3]>>,
    }

    impl ChartRenderer for Recorder {
        type Handle = usize;

        fn create(&self, dataset: &ChartDataset) -> Result<usize, ChartError> {
            if !self.available.get() {
                return Err(ChartError::Unavailable("no canvas".into()));
            }
            self.created.set(self.created.get() + 1);
            self.drawn.borrow_mut().push(dataset.values());
            Ok(self.created.get())
        }

        fn update(&self, _handle: &usize, dataset: &ChartDataset) -> Result<(), ChartError> {
            self.drawn.borrow_mut().push(dataset.values());
            Ok(())
        }
    }

    fn available() -> Recorder {
        let r = Recorder::default();
        r.available.set(true);
        r
    }

    #[test]
    fn healthy_slice_is_clamped_at_zero() {
        assert_eq!(ChartDataset::from_counts(1, 2, 4).values(), [1, 2, 1]);
        assert_eq!(ChartDataset::from_counts(0, 0, 0).values(), [0, 0, 0]);
        assert_eq!(ChartDataset::from_counts(3, 3, 2).values(), [3, 3, 0]);
    }

    #[test]
    fn creates_once_then_updates_in_place() {
        let mut chart = HealthChart::new(available());
        assert!(!chart.is_initialized());

        chart
            .update(&Counters { crit: 1, warn: 2, total: 4 })
            .expect("create");
        assert!(chart.is_initialized());
        chart
            .update(&Counters { crit: 0, warn: 0, total: 3 })
            .expect("update");

        assert_eq!(chart.renderer().created.get(), 1);
        assert_eq!(*chart.renderer().drawn.borrow(), vec![[1, 2, 1], [0, 0, 3]]);
        assert_eq!(chart.dataset().map(|d| d.values()), Some([0, 0, 3]));
    }

    #[test]
    fn failed_creation_retries_on_next_update() {
        let mut chart = HealthChart::new(Recorder::default());
        let err = chart.update(&Counters::default());
        assert!(matches!(err, Err(ChartError::Unavailable(_))));
        assert!(!chart.is_initialized());
        assert_eq!(chart.dataset(), None);

        chart.renderer().available.set(true);
        chart.update(&Counters::default()).expect("create");
        assert!(chart.is_initialized());
        assert_eq!(chart.renderer().created.get(), 1);
    }
}
