//! Shared state types for the egui UI.

use std::collections::VecDeque;

use egui::Color32;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub loss_history: LossHistory,
    /// Training is suspended until resumed or stepped manually.
    pub paused: bool,
}

impl UiState {
    pub fn new(loss_history_len: usize, paused: bool) -> Self {
        Self {
            status: StatusBarState::idle(),
            loss_history: LossHistory::new(loss_history_len),
            paused,
        }
    }
}

/// Severity of the message shown in the status bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Info,
    Warning,
    Error,
}

/// Footer text plus a colored badge.
#[derive(Clone, Debug)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        let (label, color) = status_badge(StatusTone::Idle);
        Self {
            text: "Open an iris CSV to start training".into(),
            badge_label: label,
            badge_color: color,
        }
    }
}

pub(crate) fn status_badge(tone: StatusTone) -> (String, Color32) {
    match tone {
        StatusTone::Idle => ("Idle".into(), Color32::from_rgb(42, 42, 42)),
        StatusTone::Info => ("Info".into(), Color32::from_rgb(64, 140, 112)),
        StatusTone::Warning => ("Warning".into(), Color32::from_rgb(192, 138, 43)),
        StatusTone::Error => ("Error".into(), Color32::from_rgb(192, 57, 43)),
    }
}

/// Most recent per-epoch losses, oldest first, capped at a fixed length.
#[derive(Clone, Debug)]
pub struct LossHistory {
    values: VecDeque<f32>,
    capacity: usize,
}

impl LossHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a loss, evicting the oldest value when full. Non-finite values are dropped.
    pub fn push(&mut self, loss: f32) {
        if !loss.is_finite() {
            return;
        }
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(loss);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.values.iter().copied()
    }

    /// Largest retained value, used to scale the plot.
    pub fn max(&self) -> Option<f32> {
        self.values.iter().copied().reduce(f32::max)
    }

    pub fn last(&self) -> Option<f32> {
        self.values.back().copied()
    }
}
