//! Parsed Whitespace assembly.

use std::collections::HashMap;
use std::fmt;

use super::lexer::{Token, TokenKind};

/// Why a source snapshot could not be assembled.
///
/// Rendered with `{:#?}` into every output field, so the user sees it in all
/// three panes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    UnexpectedChar { ch: char, line: usize },
    InvalidNumber { text: String, line: usize },
    UnterminatedString { line: usize },
    UnknownInstruction { name: String, line: usize },
    MissingOperand { instruction: String, line: usize },
    InvalidOperand { instruction: String, line: usize },
}

/// A named jump target, numbered in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    // Stack manipulation
    Push(i64),
    Duplicate,
    Copy(i64),
    Swap,
    Discard,
    Slide(i64),
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    // Heap access
    Store,
    Retrieve,
    // Flow control
    Mark(Label),
    Call(Label),
    Jump(Label),
    JumpIfZero(Label),
    JumpIfNegative(Label),
    Return,
    Exit,
    // I/O
    PrintChar,
    PrintNumber,
    ReadChar,
    ReadNumber,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(n) => write!(f, "push {}", n),
            Instruction::Duplicate => write!(f, "dup"),
            Instruction::Copy(n) => write!(f, "copy {}", n),
            Instruction::Swap => write!(f, "swap"),
            Instruction::Discard => write!(f, "discard"),
            Instruction::Slide(n) => write!(f, "slide {}", n),
            Instruction::Add => write!(f, "add"),
            Instruction::Subtract => write!(f, "subtract"),
            Instruction::Multiply => write!(f, "multiply"),
            Instruction::Divide => write!(f, "divide"),
            Instruction::Modulo => write!(f, "modulo"),
            Instruction::Store => write!(f, "store"),
            Instruction::Retrieve => write!(f, "retrieve"),
            Instruction::Mark(label) => write!(f, "{}:", label.name),
            Instruction::Call(label) => write!(f, "call {}", label.name),
            Instruction::Jump(label) => write!(f, "jump {}", label.name),
            Instruction::JumpIfZero(label) => write!(f, "jump_if_zero {}", label.name),
            Instruction::JumpIfNegative(label) => write!(f, "jump_if_negative {}", label.name),
            Instruction::Return => write!(f, "return"),
            Instruction::Exit => write!(f, "exit"),
            Instruction::PrintChar => write!(f, "print_char"),
            Instruction::PrintNumber => write!(f, "print_number"),
            Instruction::ReadChar => write!(f, "read_char"),
            Instruction::ReadNumber => write!(f, "read_number"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

/// Operand shape an instruction expects.
enum Operand {
    None(Instruction),
    Number(fn(i64) -> Instruction),
    Label(fn(Label) -> Instruction),
}

fn lookup(name: &str) -> Option<Operand> {
    let operand = match name {
        "push" => Operand::Number(Instruction::Push),
        "dup" | "duplicate" => Operand::None(Instruction::Duplicate),
        "copy" => Operand::Number(Instruction::Copy),
        "swap" => Operand::None(Instruction::Swap),
        "discard" | "pop" => Operand::None(Instruction::Discard),
        "slide" => Operand::Number(Instruction::Slide),
        "add" => Operand::None(Instruction::Add),
        "subtract" | "sub" => Operand::None(Instruction::Subtract),
        "multiply" | "mul" => Operand::None(Instruction::Multiply),
        "divide" | "div" => Operand::None(Instruction::Divide),
        "modulo" | "mod" => Operand::None(Instruction::Modulo),
        "store" => Operand::None(Instruction::Store),
        "retrieve" => Operand::None(Instruction::Retrieve),
        "call" => Operand::Label(Instruction::Call),
        "jump" | "jmp" => Operand::Label(Instruction::Jump),
        "jump_if_zero" | "jz" => Operand::Label(Instruction::JumpIfZero),
        "jump_if_negative" | "jn" => Operand::Label(Instruction::JumpIfNegative),
        "return" | "ret" => Operand::None(Instruction::Return),
        "exit" => Operand::None(Instruction::Exit),
        "print_char" | "print_stack_top_as_char" => Operand::None(Instruction::PrintChar),
        "print_number" | "print_stack_top_as_number" => Operand::None(Instruction::PrintNumber),
        "read_char" => Operand::None(Instruction::ReadChar),
        "read_number" => Operand::None(Instruction::ReadNumber),
        _ => return None,
    };
    Some(operand)
}

#[derive(Default)]
struct LabelTable {
    ids: HashMap<String, u32>,
}

impl LabelTable {
    fn resolve(&mut self, name: &str) -> Label {
        let next = self.ids.len() as u32;
        let id = *self.ids.entry(name.to_string()).or_insert(next);
        Label {
            name: name.to_string(),
            id,
        }
    }
}

impl Program {
    pub fn parse(tokens: &[Token]) -> Result<Self, SourceError> {
        let mut labels = LabelTable::default();
        let mut instructions = Vec::new();
        let mut iter = tokens.iter();

        while let Some(token) = iter.next() {
            let line = token.line;
            let name = match &token.kind {
                TokenKind::LabelDef(name) => {
                    instructions.push(Instruction::Mark(labels.resolve(name)));
                    continue;
                }
                TokenKind::Word(name) => name.as_str(),
                TokenKind::Number(n) => {
                    return Err(SourceError::UnknownInstruction {
                        name: n.to_string(),
                        line,
                    });
                }
                TokenKind::Str(s) => {
                    return Err(SourceError::UnknownInstruction {
                        name: format!("{:?}", s),
                        line,
                    });
                }
            };

            // `print` is sugar over push + print_char / print_number
            if name == "print" {
                match iter.next().map(|t| &t.kind) {
                    Some(TokenKind::Str(text)) => {
                        for ch in text.chars() {
                            instructions.push(Instruction::Push(ch as i64));
                            instructions.push(Instruction::PrintChar);
                        }
                    }
                    Some(TokenKind::Number(n)) => {
                        instructions.push(Instruction::Push(*n));
                        instructions.push(Instruction::PrintNumber);
                    }
                    Some(_) => {
                        return Err(SourceError::InvalidOperand {
                            instruction: name.to_string(),
                            line,
                        });
                    }
                    None => {
                        return Err(SourceError::MissingOperand {
                            instruction: name.to_string(),
                            line,
                        });
                    }
                }
                continue;
            }

            let operand = lookup(name).ok_or_else(|| SourceError::UnknownInstruction {
                name: name.to_string(),
                line,
            })?;

            let instruction = match operand {
                Operand::None(instruction) => instruction,
                Operand::Number(build) => match iter.next().map(|t| &t.kind) {
                    Some(TokenKind::Number(n)) => build(*n),
                    Some(TokenKind::Str(s)) if s.chars().count() == 1 => {
                        // push "A" pushes the code point
                        build(s.chars().next().map(|c| c as i64).unwrap_or_default())
                    }
                    Some(_) => {
                        return Err(SourceError::InvalidOperand {
                            instruction: name.to_string(),
                            line,
                        });
                    }
                    None => {
                        return Err(SourceError::MissingOperand {
                            instruction: name.to_string(),
                            line,
                        });
                    }
                },
                Operand::Label(build) => match iter.next().map(|t| &t.kind) {
                    Some(TokenKind::Word(target)) => build(labels.resolve(target)),
                    Some(_) => {
                        return Err(SourceError::InvalidOperand {
                            instruction: name.to_string(),
                            line,
                        });
                    }
                    None => {
                        return Err(SourceError::MissingOperand {
                            instruction: name.to_string(),
                            line,
                        });
                    }
                },
            };
            instructions.push(instruction);
        }

        Ok(Program { instructions })
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// One canonical mnemonic per line.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for instruction in &self.instructions {
            out.push_str(&instruction.to_string());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Lexer;

    fn parse(src: &str) -> Result<Program, SourceError> {
        Program::parse(&Lexer::new(src).tokenize()?)
    }

    #[test]
    fn test_parse_basic() {
        let program = parse("push 1 push 2 add print_number exit").unwrap();
        assert_eq!(
            program.instructions,
            vec![
                Instruction::Push(1),
                Instruction::Push(2),
                Instruction::Add,
                Instruction::PrintNumber,
                Instruction::Exit,
            ]
        );
    }

    #[test]
    fn test_labels_numbered_by_first_appearance() {
        let program = parse("jump end\nstart:\nend:\njump start").unwrap();
        let ids: Vec<u32> = program
            .instructions
            .iter()
            .map(|i| match i {
                Instruction::Jump(l) | Instruction::Mark(l) => l.id,
                _ => panic!("unexpected {i:?}"),
            })
            .collect();
        assert_eq!(ids, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_print_string_expands() {
        let program = parse(r#"print "hi""#).unwrap();
        assert_eq!(
            program.instructions,
            vec![
                Instruction::Push('h' as i64),
                Instruction::PrintChar,
                Instruction::Push('i' as i64),
                Instruction::PrintChar,
            ]
        );
    }

    #[test]
    fn test_print_number_expands() {
        let program = parse("print 99").unwrap();
        assert_eq!(
            program.instructions,
            vec![Instruction::Push(99), Instruction::PrintNumber]
        );
    }

    #[test]
    fn test_aliases() {
        let program = parse("dup duplicate sub jz x ret").unwrap();
        assert_eq!(program.instructions[0], Instruction::Duplicate);
        assert_eq!(program.instructions[1], Instruction::Duplicate);
        assert_eq!(program.instructions[2], Instruction::Subtract);
        assert!(matches!(program.instructions[3], Instruction::JumpIfZero(_)));
        assert_eq!(program.instructions[4], Instruction::Return);
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            parse("push").unwrap_err(),
            SourceError::MissingOperand {
                instruction: "push".into(),
                line: 1
            }
        );
    }

    #[test]
    fn test_invalid_operand() {
        assert!(matches!(
            parse("jump 5").unwrap_err(),
            SourceError::InvalidOperand { .. }
        ));
        assert!(matches!(
            parse("push add").unwrap_err(),
            SourceError::InvalidOperand { .. }
        ));
    }

    #[test]
    fn test_unknown_instruction() {
        assert_eq!(
            parse("push 1\nfrobnicate").unwrap_err(),
            SourceError::UnknownInstruction {
                name: "frobnicate".into(),
                line: 2
            }
        );
    }

    #[test]
    fn test_listing() {
        let program = parse("loop: push 3 jump_if_zero loop exit").unwrap();
        assert_eq!(program.listing(), "loop:\npush 3\njump_if_zero loop\nexit\n");
    }
}
