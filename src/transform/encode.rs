//! Whitespace encoding.
//!
//! Each instruction is an instruction-modification prefix (IMP) followed by
//! a command and an optional parameter. Numbers are a sign (space = +,
//! tab = -) then the binary magnitude (space = 0, tab = 1) then a newline.
//! Labels are the unsigned binary of the label id then a newline.

use super::ast::{Instruction, Program};

const IMP_STACK: &str = " ";
const IMP_ARITHMETIC: &str = "\t ";
const IMP_HEAP: &str = "\t\t";
const IMP_FLOW: &str = "\n";
const IMP_IO: &str = "\t\n";

fn push_bits(out: &mut String, mut magnitude: u64) {
    let mut bits = Vec::new();
    while magnitude > 0 {
        bits.push(if magnitude & 1 == 1 { '\t' } else { ' ' });
        magnitude >>= 1;
    }
    out.extend(bits.into_iter().rev());
}

/// Encode a signed number parameter.
pub fn encode_number(number: i64) -> String {
    let mut out = String::new();
    out.push(if number < 0 { '\t' } else { ' ' });
    if number == 0 {
        out.push(' ');
    }
    push_bits(&mut out, number.unsigned_abs());
    out.push('\n');
    out
}

/// Encode a label parameter.
pub fn encode_label(id: u32) -> String {
    let mut out = String::new();
    if id == 0 {
        out.push(' ');
    }
    push_bits(&mut out, id as u64);
    out.push('\n');
    out
}

impl Instruction {
    pub fn encode_into(&self, out: &mut String) {
        let (imp, command, param) = match self {
            Instruction::Push(n) => (IMP_STACK, " ", Some(encode_number(*n))),
            Instruction::Duplicate => (IMP_STACK, "\n ", None),
            Instruction::Copy(n) => (IMP_STACK, "\t ", Some(encode_number(*n))),
            Instruction::Swap => (IMP_STACK, "\n\t", None),
            Instruction::Discard => (IMP_STACK, "\n\n", None),
            Instruction::Slide(n) => (IMP_STACK, "\t\n", Some(encode_number(*n))),

            Instruction::Add => (IMP_ARITHMETIC, "  ", None),
            Instruction::Subtract => (IMP_ARITHMETIC, " \t", None),
            Instruction::Multiply => (IMP_ARITHMETIC, " \n", None),
            Instruction::Divide => (IMP_ARITHMETIC, "\t ", None),
            Instruction::Modulo => (IMP_ARITHMETIC, "\t\t", None),

            Instruction::Store => (IMP_HEAP, " ", None),
            Instruction::Retrieve => (IMP_HEAP, "\t", None),

            Instruction::Mark(l) => (IMP_FLOW, "  ", Some(encode_label(l.id))),
            Instruction::Call(l) => (IMP_FLOW, " \t", Some(encode_label(l.id))),
            Instruction::Jump(l) => (IMP_FLOW, " \n", Some(encode_label(l.id))),
            Instruction::JumpIfZero(l) => (IMP_FLOW, "\t ", Some(encode_label(l.id))),
            Instruction::JumpIfNegative(l) => (IMP_FLOW, "\t\t", Some(encode_label(l.id))),
            Instruction::Return => (IMP_FLOW, "\t\n", None),
            Instruction::Exit => (IMP_FLOW, "\n\n", None),

            Instruction::PrintChar => (IMP_IO, "  ", None),
            Instruction::PrintNumber => (IMP_IO, " \t", None),
            Instruction::ReadChar => (IMP_IO, "\t ", None),
            Instruction::ReadNumber => (IMP_IO, "\t\t", None),
        };
        out.push_str(imp);
        out.push_str(command);
        if let Some(param) = param {
            out.push_str(&param);
        }
    }
}

impl Program {
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for instruction in &self.instructions {
            instruction.encode_into(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::ast::Label;
    use crate::transform::unbleach;

    fn enc(i: Instruction) -> String {
        let mut out = String::new();
        i.encode_into(&mut out);
        unbleach(&out)
    }

    #[test]
    fn test_encode_number() {
        assert_eq!(unbleach(&encode_number(0)), "ssn");
        assert_eq!(unbleach(&encode_number(1)), "stn");
        assert_eq!(unbleach(&encode_number(-1)), "ttn");
        assert_eq!(unbleach(&encode_number(11)), "ststtn");
        assert_eq!(unbleach(&encode_number(99)), "sttsssttn");
    }

    #[test]
    fn test_encode_number_extremes() {
        let min = encode_number(i64::MIN);
        assert!(min.starts_with('\t'));
        // sign + 64 bits + newline
        assert_eq!(min.chars().count(), 66);
    }

    #[test]
    fn test_encode_label() {
        assert_eq!(unbleach(&encode_label(0)), "sn");
        assert_eq!(unbleach(&encode_label(1)), "tn");
        assert_eq!(unbleach(&encode_label(6)), "ttsn");
    }

    #[test]
    fn test_instruction_encodings() {
        assert_eq!(enc(Instruction::Push(11)), "ssststtn");
        assert_eq!(enc(Instruction::Duplicate), "sns");
        assert_eq!(enc(Instruction::Swap), "snt");
        assert_eq!(enc(Instruction::Discard), "snn");
        assert_eq!(enc(Instruction::Add), "tsss");
        assert_eq!(enc(Instruction::Subtract), "tsst");
        assert_eq!(enc(Instruction::Store), "tts");
        assert_eq!(enc(Instruction::Retrieve), "ttt");
        assert_eq!(enc(Instruction::PrintNumber), "tnst");
        assert_eq!(enc(Instruction::Exit), "nnn");
        let l = Label { name: "x".into(), id: 1 };
        assert_eq!(enc(Instruction::Jump(l.clone())), "nsntn");
        assert_eq!(enc(Instruction::Mark(l)), "nsstn");
    }

    #[test]
    fn test_store_sequence_matches_reference() {
        // push 11, push 0, swap, store, exit
        let program = Program {
            instructions: vec![
                Instruction::Push(11),
                Instruction::Push(0),
                Instruction::Swap,
                Instruction::Store,
                Instruction::Exit,
            ],
        };
        assert_eq!(unbleach(&program.encode()), "ssststtnssssnsntttsnnn");
    }

    #[test]
    fn test_encoded_output_is_whitespace_only() {
        let program = Program {
            instructions: vec![
                Instruction::Push(-42),
                Instruction::Call(Label { name: "f".into(), id: 3 }),
                Instruction::ReadChar,
                Instruction::Return,
            ],
        };
        assert!(program.encode().chars().all(|c| matches!(c, ' ' | '\t' | '\n')));
    }
}
