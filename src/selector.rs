use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;

use crate::error::{Error, Result};

/// Picks one entity out of the listed ones.
pub trait EntitySelector {
    fn select<'a>(&mut self, entities: &'a [String]) -> Result<&'a str>;
}

/// Parses a 1-based menu answer into a 0-based index.
pub fn parse_choice(answer: &str, len: usize) -> Result<usize> {
    let answer = answer.trim();

    let choice = match answer.parse::<i64>() {
        Ok(choice) => choice,
        // too large for any menu, but still a number
        Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(Error::SelectionOutOfRange {
                choice: answer.to_string(),
                len,
            });
        }
        Err(_) => return Err(Error::SelectionNotANumber(answer.to_string())),
    };

    match usize::try_from(choice) {
        Ok(position) if (1..=len).contains(&position) => Ok(position - 1),
        _ => Err(Error::SelectionOutOfRange {
            choice: choice.to_string(),
            len,
        }),
    }
}

/// Prints a numbered menu and reads the answer from a line of input.
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptSelector<io::StdinLock<'static>, io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> EntitySelector for PromptSelector<R, W> {
    fn select<'a>(&mut self, entities: &'a [String]) -> Result<&'a str> {
        writeln!(self.output, "Lista de pozos disponibles:")?;
        for (index, entity) in entities.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, entity)?;
        }
        write!(
            self.output,
            "Ingresa el número correspondiente al pozo que deseas seleccionar: "
        )?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        let index = parse_choice(&answer, entities.len())?;
        Ok(entities[index].as_str())
    }
}

/// Answers with a preset choice, for non-interactive runs.
pub struct FixedSelector {
    answer: String,
}

impl FixedSelector {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

impl EntitySelector for FixedSelector {
    fn select<'a>(&mut self, entities: &'a [String]) -> Result<&'a str> {
        let index = parse_choice(&self.answer, entities.len())?;
        tracing::info!("Preset selection {} of {}", index + 1, entities.len());
        Ok(entities[index].as_str())
    }
}
