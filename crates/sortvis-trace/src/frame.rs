//! What the bars look like at a given step.

use crate::step::{Step, StepKind};

/// Highlight state of a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Highlight {
    #[default]
    Default,
    Comparing,
    Minimum,
    Sorted,
}

/// One bar of the array view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bar {
    pub value: f64,
    /// Height as a fraction of the tallest bar, in `0.0..=1.0`.
    pub height: f64,
    pub highlight: Highlight,
}

/// A fully resolved view of one step, ready to draw.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub kind: Option<StepKind>,
    pub bars: Vec<Bar>,
    /// Pseudo-code line to highlight, `None` when idle.
    pub code_line: Option<usize>,
}

impl Frame {
    /// Bars for an array that is not being sorted.
    pub fn idle(values: &[f64]) -> Self {
        Self {
            kind: None,
            bars: bars(values, &vec![Highlight::Default; values.len()]),
            code_line: None,
        }
    }

    /// Derive the view of `step`.
    pub fn from_step(step: &Step) -> Self {
        let n = step.snapshot.len();
        let mut marks = vec![Highlight::Default; n];

        if step.kind != StepKind::Start {
            for mark in marks.iter_mut().take(step.outer_index.min(n)) {
                *mark = Highlight::Sorted;
            }
        }
        if step.kind == StepKind::Complete {
            marks.fill(Highlight::Sorted);
        }

        let mut set = |index: Option<usize>, highlight: Highlight| {
            if let Some(mark) = index.and_then(|i| marks.get_mut(i)) {
                *mark = highlight;
            }
        };

        match step.kind {
            StepKind::Compare => {
                set(step.compare_index, Highlight::Comparing);
                set(step.min_index, Highlight::Minimum);
            }
            StepKind::InitMin
            | StepKind::UpdateMin
            | StepKind::SwapCheck
            | StepKind::NoSwap => set(step.min_index, Highlight::Minimum),
            StepKind::Swap => set(Some(step.outer_index), Highlight::Minimum),
            StepKind::Sorted | StepKind::RoundComplete => {
                set(step.sorted_index, Highlight::Sorted)
            }
            StepKind::Start | StepKind::RoundBegin | StepKind::Complete => {}
        }

        Self {
            kind: Some(step.kind),
            bars: bars(&step.snapshot, &marks),
            code_line: Some(step.code_line),
        }
    }

    /// Indices carrying `highlight`.
    pub fn indices(&self, highlight: Highlight) -> Vec<usize> {
        self.bars
            .iter()
            .enumerate()
            .filter(|(_, bar)| bar.highlight == highlight)
            .map(|(i, _)| i)
            .collect()
    }
}

fn bars(values: &[f64], marks: &[Highlight]) -> Vec<Bar> {
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    values
        .iter()
        .zip(marks)
        .map(|(&value, &highlight)| Bar {
            value,
            height: if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 },
            highlight,
        })
        .collect()
}
