//! Step records emitted while tracing selection sort.

use std::fmt;

use crate::pseudocode;

/// What moment of the algorithm a step describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepKind {
    /// Trace begins, nothing has been touched yet
    Start,
    /// A new pass over the unsorted suffix begins
    RoundBegin,
    /// The first unsorted element is assumed to be the minimum
    InitMin,
    /// `snapshot[compare_index]` is compared with `snapshot[min_index]`
    Compare,
    /// A strictly smaller element was found
    UpdateMin,
    /// The pass found a minimum away from `outer_index` (fine-grained only)
    SwapCheck,
    /// The minimum was exchanged into place (fine-grained only)
    Swap,
    /// The minimum was already in place (fine-grained only)
    NoSwap,
    /// `outer_index` is finalized (fine-grained only)
    Sorted,
    /// Swap decision and finalization folded into one record (grouped only)
    RoundComplete,
    /// Trace is over and the snapshot is sorted
    Complete,
}

impl StepKind {
    /// Line of [`pseudocode::PSEUDOCODE`] highlighted for this kind.
    pub fn code_line(&self) -> usize {
        match self {
            StepKind::Start => pseudocode::LINE_START,
            StepKind::RoundBegin => pseudocode::LINE_OUTER_LOOP,
            StepKind::InitMin => pseudocode::LINE_INIT_MIN,
            StepKind::Compare => pseudocode::LINE_COMPARE,
            StepKind::UpdateMin => pseudocode::LINE_UPDATE_MIN,
            StepKind::SwapCheck => pseudocode::LINE_SWAP_CHECK,
            StepKind::Swap => pseudocode::LINE_SWAP,
            StepKind::NoSwap => pseudocode::LINE_NO_SWAP,
            StepKind::Sorted | StepKind::RoundComplete => pseudocode::LINE_ROUND_END,
            StepKind::Complete => pseudocode::LINE_RETURN,
        }
    }

    /// Stable snake_case tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Start => "start",
            StepKind::RoundBegin => "round_begin",
            StepKind::InitMin => "init_min",
            StepKind::Compare => "compare",
            StepKind::UpdateMin => "update_min",
            StepKind::SwapCheck => "swap_check",
            StepKind::Swap => "swap",
            StepKind::NoSwap => "no_swap",
            StepKind::Sorted => "sorted",
            StepKind::RoundComplete => "round_complete",
            StepKind::Complete => "complete",
        }
    }

    /// Whether this kind closes a pass (the decision after the inner loop).
    pub fn is_swap_decision(&self) -> bool {
        matches!(
            self,
            StepKind::Swap | StepKind::NoSwap | StepKind::RoundComplete
        )
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured narration block summarizing a whole pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NarrationGroup {
    pub icon: String,
    /// May be empty; the block is then rendered without a header.
    pub title: String,
    pub lines: Vec<String>,
}

impl NarrationGroup {
    pub fn new(icon: &str, title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            icon: icon.to_string(),
            title: title.into(),
            lines,
        }
    }
}

/// One traced moment of execution.
///
/// `snapshot` is the array exactly as it stands after whatever mutation the
/// step represents. Positions below `outer_index` are finalized and never
/// change again in later steps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub kind: StepKind,
    pub snapshot: Vec<f64>,
    /// `0` for [`StepKind::Start`], `n` for [`StepKind::Complete`].
    pub outer_index: usize,
    pub compare_index: Option<usize>,
    pub min_index: Option<usize>,
    /// Index finalized by [`StepKind::Sorted`] or [`StepKind::RoundComplete`].
    pub sorted_index: Option<usize>,
    pub code_line: usize,
    pub narration: String,
    pub group: Option<NarrationGroup>,
}

impl Step {
    pub(crate) fn new(kind: StepKind, snapshot: &[f64], outer_index: usize) -> Self {
        Self {
            kind,
            snapshot: snapshot.to_vec(),
            outer_index,
            compare_index: None,
            min_index: None,
            sorted_index: None,
            code_line: kind.code_line(),
            narration: String::new(),
            group: None,
        }
    }

    pub(crate) fn with_compare(mut self, index: usize) -> Self {
        self.compare_index = Some(index);
        self
    }

    pub(crate) fn with_min(mut self, index: usize) -> Self {
        self.min_index = Some(index);
        self
    }

    pub(crate) fn with_sorted(mut self, index: usize) -> Self {
        self.sorted_index = Some(index);
        self
    }

    pub(crate) fn with_narration(mut self, text: impl Into<String>) -> Self {
        self.narration = text.into();
        self
    }

    pub(crate) fn with_group(mut self, group: NarrationGroup) -> Self {
        self.group = Some(group);
        self
    }

    /// Number of elements in the snapshot.
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

/// Counts of the operations a trace performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceSummary {
    pub steps: usize,
    pub rounds: usize,
    pub comparisons: usize,
    pub min_updates: usize,
    pub swaps: usize,
}

impl TraceSummary {
    /// Tally a trace.
    ///
    /// Swaps are counted from the snapshots so that grouped traces, which
    /// fold the exchange into their round-complete record, count the same.
    pub fn of(steps: &[Step]) -> Self {
        let mut summary = TraceSummary {
            steps: steps.len(),
            ..Default::default()
        };
        let mut before_decision: Option<&[f64]> = None;

        for step in steps {
            match step.kind {
                StepKind::RoundBegin => {
                    summary.rounds += 1;
                    before_decision = Some(&step.snapshot);
                }
                StepKind::Compare => summary.comparisons += 1,
                StepKind::UpdateMin => summary.min_updates += 1,
                kind if kind.is_swap_decision() => {
                    if before_decision.is_some_and(|prev| prev != step.snapshot.as_slice()) {
                        summary.swaps += 1;
                    }
                    before_decision = None;
                }
                _ => {}
            }
        }

        summary
    }
}

/// Render values the way the narration prints arrays: `5, 3, 1`.
pub fn join_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
