//! Transform boundary.
//!
//! The visualizer treats the source-to-Whitespace transformation as an opaque,
//! pure function. [`Transform`] is that seam; [`WhitespaceAssembler`] is the
//! implementation shipped with the binary.

mod ast;
mod encode;
mod lexer;

pub use ast::{Instruction, Program, SourceError};
pub use encode::{encode_label, encode_number};
pub use lexer::{Lexer, Token};

use tracing::trace;

/// The three derived views of one source snapshot.
///
/// Always produced and replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOutput {
    pub ast: String,
    pub debug_output: String,
    pub encoded_output: String,
}

impl TransformOutput {
    pub fn new(
        ast: impl Into<String>,
        debug_output: impl Into<String>,
        encoded_output: impl Into<String>,
    ) -> Self {
        Self {
            ast: ast.into(),
            debug_output: debug_output.into(),
            encoded_output: encoded_output.into(),
        }
    }
}

/// A pure, total transformation from source text to its three views.
///
/// Implementations must return an output for every input, the empty string
/// included. Problems with the source are reported inside the output.
pub trait Transform {
    fn transform(&self, source: &str) -> TransformOutput;
}

impl<F> Transform for F
where
    F: Fn(&str) -> TransformOutput,
{
    fn transform(&self, source: &str) -> TransformOutput {
        self(source)
    }
}

/// Whitespace assembly to Whitespace program.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceAssembler;

impl Transform for WhitespaceAssembler {
    fn transform(&self, source: &str) -> TransformOutput {
        let tokens = Lexer::new(source).tokenize();
        match tokens.and_then(|tokens| Program::parse(&tokens)) {
            Ok(program) => {
                trace!(instructions = program.len(), "assembled");
                TransformOutput {
                    ast: format!("{:#?}", program),
                    debug_output: program.listing(),
                    encoded_output: program.encode(),
                }
            }
            Err(err) => {
                let text = format!("{:#?}", err);
                TransformOutput::new(text.clone(), text.clone(), text)
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn unbleach(code: &str) -> String {
    code.chars()
        .map(|c| match c {
            ' ' => 's',
            '\t' => 't',
            '\n' => 'n',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_is_valid() {
        let out = WhitespaceAssembler.transform("");
        assert_eq!(out.encoded_output, "");
        assert_eq!(out.debug_output, "");
        assert!(out.ast.contains("Program"));
    }

    #[test]
    fn test_print_number_program() {
        let out = WhitespaceAssembler.transform("push 99\nprint_number\nexit\n");
        assert_eq!(unbleach(&out.encoded_output), "sssttsssttntnstnnn");
        assert_eq!(out.debug_output, "push 99\nprint_number\nexit\n");
    }

    #[test]
    fn test_error_fills_all_fields() {
        let out = WhitespaceAssembler.transform("push");
        assert!(!out.ast.is_empty());
        assert_eq!(out.ast, out.debug_output);
        assert_eq!(out.ast, out.encoded_output);
        assert!(out.encoded_output.contains("MissingOperand"));
    }

    #[test]
    fn test_deterministic() {
        let src = "start:\npush -5\ndup\njump_if_negative start\nexit";
        assert_eq!(WhitespaceAssembler.transform(src), WhitespaceAssembler.transform(src));
    }

    #[test]
    fn test_closure_is_a_transform() {
        let t = |s: &str| TransformOutput::new(s, s, s.len().to_string());
        assert_eq!(t.transform("abc").encoded_output, "3");
    }
}
