use crate::security::ALLOWED_FRAGMENTS;
use std::path::Path;
use thiserror::Error;

/// Tokens that only mean something to a shell
const SHELL_OPERATORS: &[&str] = &["|", "||", "&&", ";", "&", ">", ">>", "<", "<<"];

/// `find` actions that start other programs, delete, or write files
const FIND_UNSAFE_ACTIONS: &[&str] = &[
    "-exec", "-execdir", "-ok", "-okdir", "-delete", "-fprint", "-fprint0", "-fprintf", "-fls",
];

#[derive(Debug, Error, PartialEq)]
pub enum ArgvError {
    #[error("Empty command")]
    EmptyCommand,

    #[error("Command has unbalanced quotes")]
    UnbalancedQuotes,

    #[error("Program not allowed: {0}")]
    DisallowedProgram(String),

    #[error("Command contains shell operator: {0}")]
    ShellOperator(String),

    #[error("find action not allowed: {0}")]
    UnsafeFindAction(String),
}

/// Split a confirmed command into an argument vector for direct launch
///
/// The command never reaches a shell. The program must be one of the
/// allowlisted verbs (an absolute path such as `/usr/bin/find` is accepted by
/// file name) and shell control operators are rejected rather than passed on
/// as literal arguments. `find` may not use actions that run programs,
/// delete or write files.
pub fn prepare_argv(command: &str) -> Result<Vec<String>, ArgvError> {
    if command.trim().is_empty() {
        return Err(ArgvError::EmptyCommand);
    }

    let argv = shlex::split(command).ok_or(ArgvError::UnbalancedQuotes)?;
    let Some(program) = argv.first() else {
        return Err(ArgvError::EmptyCommand);
    };

    let name = Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(program);
    if !ALLOWED_FRAGMENTS.contains(&name) {
        return Err(ArgvError::DisallowedProgram(program.clone()));
    }

    let is_find = name == "find";
    for token in &argv[1..] {
        if is_find && FIND_UNSAFE_ACTIONS.contains(&token.as_str()) {
            return Err(ArgvError::UnsafeFindAction(token.clone()));
        }
        if SHELL_OPERATORS.contains(&token.as_str()) {
            return Err(ArgvError::ShellOperator(token.clone()));
        }
        if token.contains("$(") || token.contains('`') {
            return Err(ArgvError::ShellOperator(token.clone()));
        }
    }

    Ok(argv)
}
