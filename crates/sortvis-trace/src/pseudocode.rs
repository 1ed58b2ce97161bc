//! The pseudo-code listing shown beside the bars.
//!
//! Every [`Step`](crate::Step) carries a `code_line` indexing into
//! [`PSEUDOCODE`].

pub const LINE_START: usize = 0;
pub const LINE_OUTER_LOOP: usize = 2;
pub const LINE_INIT_MIN: usize = 4;
pub const LINE_COMPARE: usize = 6;
pub const LINE_UPDATE_MIN: usize = 9;
pub const LINE_SWAP_CHECK: usize = 12;
pub const LINE_SWAP: usize = 14;
pub const LINE_NO_SWAP: usize = 16;
pub const LINE_ROUND_END: usize = 18;
pub const LINE_RETURN: usize = 19;

/// Selection sort, one entry per displayed line.
pub const PSEUDOCODE: [&str; 20] = [
    "procedure selectionSort(arr)",
    "  n ← length(arr)",
    "  for i ← 0 to n − 2 do",
    "    // arr[0..i−1] is already sorted",
    "    minIndex ← i",
    "    for j ← i + 1 to n − 1 do",
    "      if arr[j] < arr[minIndex] then",
    "        // arr[j] is the smallest",
    "        // value seen in this pass",
    "        minIndex ← j",
    "      end if",
    "    end for",
    "    if minIndex ≠ i then",
    "      // move the minimum to position i",
    "      swap(arr[i], arr[minIndex])",
    "    else",
    "      // arr[i] is already the minimum",
    "    end if",
    "  end for",
    "  return arr",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_lines_point_at_matching_code() {
        assert!(PSEUDOCODE[LINE_OUTER_LOOP].contains("for i"));
        assert!(PSEUDOCODE[LINE_INIT_MIN].contains("minIndex ← i"));
        assert!(PSEUDOCODE[LINE_COMPARE].contains("arr[j] < arr[minIndex]"));
        assert!(PSEUDOCODE[LINE_UPDATE_MIN].contains("minIndex ← j"));
        assert!(PSEUDOCODE[LINE_SWAP_CHECK].contains("minIndex ≠ i"));
        assert!(PSEUDOCODE[LINE_SWAP].contains("swap"));
        assert!(PSEUDOCODE[LINE_RETURN].contains("return"));
    }
}
