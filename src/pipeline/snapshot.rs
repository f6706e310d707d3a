//! Output State - the latest accepted transform output.
//!
//! The three views live together in one `Rc<TransformOutput>`. A replace
//! swaps the whole triple and bumps the generation counter, so every reader
//! (panes, overlay, export) sees fields from the same source snapshot, and
//! anything derived from it can tell when to recompute by comparing
//! generations.

use std::rc::Rc;

use crate::transform::TransformOutput;

#[derive(Debug)]
pub struct OutputState {
    current: Rc<TransformOutput>,
    generation: u64,
}

impl OutputState {
    /// Start with an empty output (all three fields empty).
    pub fn new() -> Self {
        Self {
            current: Rc::new(TransformOutput::default()),
            generation: 0,
        }
    }

    /// Current snapshot.
    pub fn current(&self) -> Rc<TransformOutput> {
        self.current.clone()
    }

    /// Replace the snapshot as a whole.
    pub fn replace(&mut self, output: TransformOutput) {
        self.current = Rc::new(output);
        self.generation += 1;
    }

    /// Number of replaces so far. Zero until the first accepted output.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for OutputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let state = OutputState::new();
        assert_eq!(*state.current(), TransformOutput::default());
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn test_replace_swaps_all_fields() {
        let mut state = OutputState::new();
        state.replace(TransformOutput::new("a1", "d1", "e1"));
        let first = state.current();

        state.replace(TransformOutput::new("a2", "d2", "e2"));
        let second = state.current();

        // An earlier read keeps its own consistent triple
        assert_eq!(*first, TransformOutput::new("a1", "d1", "e1"));
        assert_eq!(*second, TransformOutput::new("a2", "d2", "e2"));
        assert_eq!(state.generation(), 2);
    }

    #[test]
    fn test_identical_output_still_counts() {
        let mut state = OutputState::new();
        state.replace(TransformOutput::new("x", "y", " "));
        state.replace(TransformOutput::new("x", "y", " "));
        assert_eq!(state.generation(), 2);
    }
}
