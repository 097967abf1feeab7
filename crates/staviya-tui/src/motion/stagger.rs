//! L3 Molecular Layer: Stagger planning
//!
//! Assigns each item of an ordered list the delay `index * interval`.

use std::time::Duration;

/// An item with its position and entrance delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staged<T> {
    pub item: T,
    pub index: usize,
    pub delay: Duration,
}

/// Delay of the item at `index`
#[inline]
pub fn delay_at(index: usize, interval: Duration) -> Duration {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    interval.saturating_mul(index)
}

/// Pure and deterministic: equal input always gives an equal plan
pub fn plan<T>(items: impl IntoIterator<Item = T>, interval: Duration) -> Vec<Staged<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| Staged {
            item,
            index,
            delay: delay_at(index, interval),
        })
        .collect()
}

/// Keeps the last plan of one section's item ids and replans only when the
/// list changed in length or order
#[derive(Debug, Clone)]
pub struct StaggerSequencer {
    interval: Duration,
    plan: Vec<Staged<String>>,
}

impl StaggerSequencer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            plan: Vec::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Bring the plan in line with `ids`. Returns true when it was recomputed.
    pub fn sync<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> bool {
        let ids: Vec<&str> = ids.into_iter().collect();
        let unchanged = ids.len() == self.plan.len()
            && ids.iter().zip(&self.plan).all(|(id, staged)| *id == staged.item);
        if unchanged {
            return false;
        }

        self.plan = plan(ids.into_iter().map(str::to_string), self.interval);
        tracing::debug!("Replanned stagger for {} item(s)", self.plan.len());
        true
    }

    pub fn plan(&self) -> &[Staged<String>] {
        &self.plan
    }

    pub fn delay_of(&self, id: &str) -> Option<Duration> {
        self.plan.iter().find(|s| s.item == id).map(|s| s.delay)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.plan.iter().position(|s| s.item == id)
    }

    pub fn len(&self) -> usize {
        self.plan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }
}
