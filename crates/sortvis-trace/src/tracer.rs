//! Selection sort instrumented to record every step.

use crate::error::{Error, Result};
use crate::step::{join_values, NarrationGroup, Step, StepKind};

/// How much of the algorithm's framing is spelled out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Verbosity {
    /// One record per micro-operation, flat narration on every step
    Fine,
    /// Round framing and completion collapsed into narration blocks
    #[default]
    Grouped,
}

impl std::str::FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fine" => Ok(Verbosity::Fine),
            "grouped" => Ok(Verbosity::Grouped),
            other => Err(format!("unknown verbosity '{}' (expected fine or grouped)", other)),
        }
    }
}

/// Configuration for a trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceConfig {
    pub verbosity: Verbosity,
}

/// Trace selection sort over `input`.
///
/// The caller's slice is never modified. Empty and single-element inputs
/// produce exactly a start and a complete step.
pub fn generate(input: &[f64], verbosity: Verbosity) -> Result<Vec<Step>> {
    Tracer::new(TraceConfig { verbosity }).trace(input)
}

/// Runs selection sort on a private copy and records steps.
pub struct Tracer {
    config: TraceConfig,
    arr: Vec<f64>,
    steps: Vec<Step>,
}

impl Tracer {
    /// Create a tracer with the given configuration.
    pub fn new(config: TraceConfig) -> Self {
        Self {
            config,
            arr: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Consume the tracer and return the full step sequence for `input`.
    pub fn trace(mut self, input: &[f64]) -> Result<Vec<Step>> {
        validate(input)?;
        self.arr = input.to_vec();
        let n = self.arr.len();

        self.record_start();

        for i in 0..n.saturating_sub(1) {
            self.record_round_begin(i);

            let mut min_index = i;
            self.push(
                Step::new(StepKind::InitMin, &self.arr, i)
                    .with_min(i)
                    .with_narration(format!(
                        "Assume the element at position {} ({}) is the minimum",
                        i, self.arr[i]
                    )),
            );

            for j in i + 1..n {
                self.push(
                    Step::new(StepKind::Compare, &self.arr, i)
                        .with_compare(j)
                        .with_min(min_index)
                        .with_narration(format!(
                            "Compare arr[{}] = {} with arr[{}] = {}",
                            j, self.arr[j], min_index, self.arr[min_index]
                        )),
                );

                // Strict: ties keep the leftmost minimum.
                if self.arr[j] < self.arr[min_index] {
                    min_index = j;
                    self.push(
                        Step::new(StepKind::UpdateMin, &self.arr, i)
                            .with_compare(j)
                            .with_min(min_index)
                            .with_narration(format!(
                                "Found a smaller element! Update minIndex = {} (value {})",
                                j, self.arr[j]
                            )),
                    );
                }
            }

            match self.config.verbosity {
                Verbosity::Fine => self.finish_round_fine(i, min_index),
                Verbosity::Grouped => self.finish_round_grouped(i, min_index),
            }
        }

        self.record_complete();
        Ok(self.steps)
    }

    fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    fn rounds(&self) -> usize {
        self.arr.len().saturating_sub(1)
    }

    fn record_start(&mut self) {
        let n = self.arr.len();
        let step = Step::new(StepKind::Start, &self.arr, 0);
        let step = match self.config.verbosity {
            Verbosity::Fine => step.with_narration(format!(
                "Starting selection sort on [{}] ({} elements)",
                join_values(&self.arr),
                n
            )),
            Verbosity::Grouped => step
                .with_narration("Starting selection sort")
                .with_group(NarrationGroup::new(
                    "🚀",
                    "Start",
                    vec![
                        format!("Initial array: [{}]", join_values(&self.arr)),
                        format!("Sorting {} elements", n),
                    ],
                )),
        };
        self.push(step);
    }

    fn record_round_begin(&mut self, i: usize) {
        let title = format!("Round {}/{}", i + 1, self.rounds());
        let step = Step::new(StepKind::RoundBegin, &self.arr, i);
        let step = match self.config.verbosity {
            Verbosity::Fine => step.with_narration(format!(
                "{}: find the minimum of arr[{}..{}] and place it at position {}",
                title,
                i,
                self.arr.len() - 1,
                i
            )),
            Verbosity::Grouped => {
                let marked = self
                    .arr
                    .iter()
                    .enumerate()
                    .map(|(idx, v)| if idx == i { format!("({})", v) } else { v.to_string() })
                    .collect::<Vec<_>>()
                    .join(", ");
                step.with_narration(title.clone()).with_group(NarrationGroup::new(
                    "🔄",
                    title,
                    vec![
                        format!("Array before: [{}]", marked),
                        format!("i = {}, arr[i] = {}", i, self.arr[i]),
                    ],
                ))
            }
        };
        self.push(step);
    }

    fn finish_round_fine(&mut self, i: usize, min_index: usize) {
        if min_index != i {
            self.push(
                Step::new(StepKind::SwapCheck, &self.arr, i)
                    .with_min(min_index)
                    .with_narration(format!(
                        "minIndex = {} differs from i = {}, a swap is needed",
                        min_index, i
                    )),
            );

            let (a, b) = (self.arr[i], self.arr[min_index]);
            self.arr.swap(i, min_index);
            self.push(
                Step::new(StepKind::Swap, &self.arr, i)
                    .with_min(min_index)
                    .with_narration(format!(
                        "Swap arr[{}] ↔ arr[{}] ({} ↔ {})",
                        i, min_index, a, b
                    )),
            );
        } else {
            self.push(
                Step::new(StepKind::NoSwap, &self.arr, i)
                    .with_min(min_index)
                    .with_narration(format!(
                        "No swap needed: arr[{}] = {} is already the minimum",
                        i, self.arr[i]
                    )),
            );
        }

        self.push(
            Step::new(StepKind::Sorted, &self.arr, i)
                .with_sorted(i)
                .with_narration(format!(
                    "Position {} is now final (value {})",
                    i, self.arr[i]
                )),
        );
    }

    fn finish_round_grouped(&mut self, i: usize, min_index: usize) {
        let swap_line = if min_index != i {
            let line = format!(
                "Swap: arr[{}] ↔ arr[{}] ({} ↔ {})",
                i, min_index, self.arr[i], self.arr[min_index]
            );
            self.arr.swap(i, min_index);
            line
        } else {
            format!(
                "No swap needed: arr[{}] = {} is already the minimum",
                i, self.arr[i]
            )
        };

        let lines = vec![
            format!(
                "Minimum from i={} → minIndex = {}, arr[minIndex] = {}",
                i, min_index, self.arr[i]
            ),
            swap_line,
            format!("Array after: [{}]", join_values(&self.arr)),
            "─".repeat(50),
        ];

        self.push(
            Step::new(StepKind::RoundComplete, &self.arr, i)
                .with_min(min_index)
                .with_sorted(i)
                .with_narration(format!("Round {} complete", i + 1))
                .with_group(NarrationGroup::new("✅", "", lines)),
        );
    }

    fn record_complete(&mut self) {
        let n = self.arr.len();
        let step = Step::new(StepKind::Complete, &self.arr, n);
        let step = match self.config.verbosity {
            Verbosity::Fine => step.with_narration(format!(
                "Sorting complete! Sorted array: [{}]",
                join_values(&self.arr)
            )),
            Verbosity::Grouped => step
                .with_narration("Sorting complete!")
                .with_group(NarrationGroup::new(
                    "🎉",
                    "Done",
                    vec![
                        "Selection sort finished!".to_string(),
                        format!("Sorted array: [{}]", join_values(&self.arr)),
                        format!("Complexity: O(n²) with {} elements", n),
                    ],
                )),
        };
        self.push(step);
    }
}

fn validate(input: &[f64]) -> Result<()> {
    match input.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(Error::NonFiniteValue {
            index,
            value: input[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraceSummary;
    use proptest::prelude::*;

    fn kinds(steps: &[Step]) -> Vec<StepKind> {
        steps.iter().map(|s| s.kind).collect()
    }

    fn round_of(steps: &[Step], i: usize) -> Vec<&Step> {
        steps
            .iter()
            .filter(|s| {
                s.outer_index == i && !matches!(s.kind, StepKind::Start | StepKind::Complete)
            })
            .collect()
    }

    #[test]
    fn empty_input_is_start_then_complete() {
        for verbosity in [Verbosity::Fine, Verbosity::Grouped] {
            let steps = generate(&[], verbosity).unwrap();
            assert_eq!(kinds(&steps), vec![StepKind::Start, StepKind::Complete]);
            assert!(steps[1].snapshot.is_empty());
        }
    }

    #[test]
    fn singleton_is_start_then_complete() {
        for verbosity in [Verbosity::Fine, Verbosity::Grouped] {
            let steps = generate(&[7.0], verbosity).unwrap();
            assert_eq!(kinds(&steps), vec![StepKind::Start, StepKind::Complete]);
            assert_eq!(steps[1].snapshot, vec![7.0]);
            assert_eq!(steps[1].outer_index, 1);
        }
    }

    #[test]
    fn five_three_three_one_fine() {
        let input = [5.0, 3.0, 3.0, 1.0];
        let steps = generate(&input, Verbosity::Fine).unwrap();

        assert_eq!(steps.last().unwrap().snapshot, vec![1.0, 3.0, 3.0, 5.0]);

        // Round 0 settles on index 3 and swaps.
        let round0 = round_of(&steps, 0);
        let swap = round0.iter().find(|s| s.kind == StepKind::Swap).unwrap();
        assert_eq!(swap.min_index, Some(3));
        assert_eq!(swap.snapshot, vec![1.0, 3.0, 3.0, 5.0]);

        // Round 1: the 3 at index 1 already wins against the tie and the 5.
        let round1 = round_of(&steps, 1);
        assert!(round1.iter().all(|s| s.kind != StepKind::UpdateMin));
        assert!(round1.iter().any(|s| s.kind == StepKind::NoSwap));
        assert_eq!(
            round1.iter().map(|s| s.kind).collect::<Vec<_>>(),
            vec![
                StepKind::RoundBegin,
                StepKind::InitMin,
                StepKind::Compare,
                StepKind::Compare,
                StepKind::NoSwap,
                StepKind::Sorted,
            ]
        );
    }

    #[test]
    fn five_three_three_one_grouped() {
        let steps = generate(&[5.0, 3.0, 3.0, 1.0], Verbosity::Grouped).unwrap();
        let complete: Vec<_> = steps
            .iter()
            .filter(|s| s.kind == StepKind::RoundComplete)
            .collect();

        assert_eq!(complete.len(), 3);
        assert_eq!(complete[0].min_index, Some(3));
        assert_eq!(complete[1].min_index, Some(1));
        let group = complete[1].group.as_ref().unwrap();
        assert!(group.lines[1].starts_with("No swap needed"));
        assert_eq!(steps.last().unwrap().snapshot, vec![1.0, 3.0, 3.0, 5.0]);
    }

    #[test]
    fn grouped_mode_has_no_fine_only_kinds() {
        let steps = generate(&[4.0, 2.0, 9.0, 1.0], Verbosity::Grouped).unwrap();
        assert!(steps.iter().all(|s| !matches!(
            s.kind,
            StepKind::SwapCheck | StepKind::Swap | StepKind::NoSwap | StepKind::Sorted
        )));
        for step in &steps {
            let framing = matches!(
                step.kind,
                StepKind::Start | StepKind::RoundBegin | StepKind::RoundComplete | StepKind::Complete
            );
            assert_eq!(step.group.is_some(), framing, "{:?}", step.kind);
        }
    }

    #[test]
    fn fine_mode_has_no_groups() {
        let steps = generate(&[4.0, 2.0, 9.0, 1.0], Verbosity::Fine).unwrap();
        assert!(steps.iter().all(|s| s.group.is_none()));
        assert!(steps.iter().all(|s| s.kind != StepKind::RoundComplete));
        assert!(steps.iter().all(|s| !s.narration.is_empty()));
    }

    #[test]
    fn swap_check_snapshot_precedes_exchange() {
        let steps = generate(&[2.0, 1.0], Verbosity::Fine).unwrap();
        let check = steps.iter().find(|s| s.kind == StepKind::SwapCheck).unwrap();
        let swap = steps.iter().find(|s| s.kind == StepKind::Swap).unwrap();
        assert_eq!(check.snapshot, vec![2.0, 1.0]);
        assert_eq!(swap.snapshot, vec![1.0, 2.0]);
        assert_eq!(swap.narration, "Swap arr[0] ↔ arr[1] (2 ↔ 1)");
    }

    #[test]
    fn all_duplicates_never_swap() {
        let steps = generate(&[4.0, 4.0, 4.0], Verbosity::Fine).unwrap();
        let summary = TraceSummary::of(&steps);
        assert_eq!(summary.swaps, 0);
        assert_eq!(summary.min_updates, 0);
        assert_eq!(summary.comparisons, 3);
        assert_eq!(summary.rounds, 2);
    }

    #[test]
    fn summary_agrees_across_modes() {
        let input = [9.0, 7.0, 8.0, 1.0, 7.0];
        let fine = TraceSummary::of(&generate(&input, Verbosity::Fine).unwrap());
        let grouped = TraceSummary::of(&generate(&input, Verbosity::Grouped).unwrap());
        assert_eq!(fine.comparisons, grouped.comparisons);
        assert_eq!(fine.min_updates, grouped.min_updates);
        assert_eq!(fine.swaps, grouped.swaps);
        assert_eq!(fine.comparisons, 10);
    }

    #[test]
    fn caller_input_is_untouched() {
        let input = vec![3.0, 2.0, 1.0];
        let _ = generate(&input, Verbosity::Grouped).unwrap();
        assert_eq!(input, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn rejects_non_finite() {
        let err = generate(&[1.0, f64::NAN], Verbosity::Fine).unwrap_err();
        assert!(matches!(err, Error::NonFiniteValue { index: 1, .. }));

        let err = generate(&[f64::INFINITY], Verbosity::Grouped).unwrap_err();
        assert!(matches!(err, Error::NonFiniteValue { index: 0, .. }));
    }

    #[test]
    fn parses_verbosity() {
        assert_eq!("fine".parse::<Verbosity>().unwrap(), Verbosity::Fine);
        assert_eq!(" Grouped ".parse::<Verbosity>().unwrap(), Verbosity::Grouped);
        assert!("loud".parse::<Verbosity>().is_err());
    }

    fn verbosity() -> impl Strategy<Value = Verbosity> {
        prop_oneof![Just(Verbosity::Fine), Just(Verbosity::Grouped)]
    }

    fn values() -> impl Strategy<Value = Vec<f64>> {
        // Small integer range so duplicates are common.
        prop::collection::vec((-20i32..20).prop_map(f64::from), 0..16)
    }

    proptest! {
        #[test]
        fn final_snapshot_is_sorted_permutation(input in values(), v in verbosity()) {
            let steps = generate(&input, v).unwrap();
            let last = steps.last().unwrap();
            prop_assert_eq!(last.kind, StepKind::Complete);

            let mut expected = input.clone();
            expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
            prop_assert_eq!(&last.snapshot, &expected);
        }

        #[test]
        fn finalized_positions_never_change(input in values(), v in verbosity()) {
            let steps = generate(&input, v).unwrap();
            for (k, step) in steps.iter().enumerate() {
                if let Some(i) = step.sorted_index {
                    for later in &steps[k..] {
                        prop_assert_eq!(later.snapshot[i], step.snapshot[i]);
                    }
                }
                for later in &steps[k..] {
                    prop_assert_eq!(&later.snapshot[..step.outer_index], &step.snapshot[..step.outer_index]);
                }
            }
        }

        #[test]
        fn trace_is_deterministic(input in values(), v in verbosity()) {
            let a = generate(&input, v).unwrap();
            let b = generate(&input, v).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn min_index_tracks_leftmost_minimum(input in values(), v in verbosity()) {
            let steps = generate(&input, v).unwrap();
            let n = input.len();
            for step in &steps {
                let Some(m) = step.min_index else { continue };
                let i = step.outer_index;
                prop_assert!(m >= i && m < n);

                // Leftmost minimum of snapshot[i..=seen], before any exchange.
                let seen = match step.kind {
                    StepKind::InitMin => i,
                    StepKind::Compare | StepKind::UpdateMin => step.compare_index.unwrap(),
                    _ => continue,
                };
                let window = &step.snapshot[i..=seen];
                let min = window.iter().cloned().fold(f64::INFINITY, f64::min);
                let leftmost = i + window.iter().position(|&x| x == min).unwrap();
                let expected = if step.kind == StepKind::Compare {
                    // min_index reflects elements before j
                    let before = &step.snapshot[i..seen];
                    let min = before.iter().cloned().fold(f64::INFINITY, f64::min);
                    i + before.iter().position(|&x| x == min).unwrap()
                } else {
                    leftmost
                };
                prop_assert_eq!(m, expected);
            }
        }

        #[test]
        fn no_op_swap_leaves_snapshot_unchanged(input in values(), v in verbosity()) {
            let steps = generate(&input, v).unwrap();
            for (k, step) in steps.iter().enumerate() {
                if step.kind.is_swap_decision() && step.min_index == Some(step.outer_index) {
                    prop_assert_eq!(&step.snapshot, &steps[k - 1].snapshot);
                }
            }
        }
    }
}
