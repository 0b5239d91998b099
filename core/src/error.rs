use thiserror::Error;

/// Failures reported by the interpreter.
///
/// None of these are fatal inside the core; the host decides whether to halt, log or carry on.
/// A step that fails leaves the machine state exactly as it was before the step.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    LoadTooLarge { size: usize, max: usize },

    #[error("stack overflow: call at {address:#05X} with the call stack already full")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return at {address:#05X} with an empty call stack")]
    StackUnderflow { address: u16 },

    #[error("unknown opcode {opcode:#06X} at {address:#05X}")]
    UnknownOpcode { address: u16, opcode: u16 },

    #[error("failed to read ROM")]
    Io(#[from] std::io::Error),
}
