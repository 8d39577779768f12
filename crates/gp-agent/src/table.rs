//! Sparse two-level Q-table: state → (action node → value).

use rustc_hash::FxHashMap;

use gp_core::NodeId;

use crate::QState;

#[derive(Clone, Debug, Default)]
pub struct QTable {
    values: FxHashMap<QState, FxHashMap<NodeId, f64>>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learned value, `0.0` for unseen pairs.
    #[inline]
    pub fn get(&self, state: &QState, action: NodeId) -> f64 {
        self.values
            .get(state)
            .and_then(|row| row.get(&action))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, state: QState, action: NodeId, value: f64) {
        self.values.entry(state).or_default().insert(action, value);
    }

    /// Highest value over `actions`; `0.0` when there are none.
    pub fn max_value(&self, state: &QState, actions: &[NodeId]) -> f64 {
        actions
            .iter()
            .map(|&a| self.get(state, a))
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// The first action with the strictly highest value.
    pub fn best_action(&self, state: &QState, actions: &[NodeId]) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &a in actions {
            let v = self.get(state, a);
            if best.is_none_or(|(_, bv)| v > bv) {
                best = Some((a, v));
            }
        }
        best.map(|(a, _)| a)
    }

    /// One-step Q-learning update; returns the new value.
    ///
    /// `Q(s,a) ← Q(s,a) + α · (r + γ · max_next − Q(s,a))`
    pub fn update(
        &mut self,
        state: QState,
        action: NodeId,
        reward: f64,
        max_next: f64,
        learning_rate: f64,
        discount: f64,
    ) -> f64 {
        let current = self.get(&state, action);
        let value = current + learning_rate * (reward + discount * max_next - current);
        self.set(state, action, value);
        value
    }

    /// Number of distinct states with at least one entry.
    pub fn state_count(&self) -> usize {
        self.values.len()
    }

    /// Total number of (state, action) entries.
    pub fn entry_count(&self) -> usize {
        self.values.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
