//! Choosing one option from a list.
//!
//! Generation asks a [`Chooser`] whenever the player has a decision to
//! make. The interactive chooser prompts on a terminal; the automatic one
//! picks uniformly at random and never blocks.

use std::io::{BufRead, Write};

use lp_mechanics::RandomSource;

use crate::error::{SelectResult, SelectionError};

/// Makes choices during generation.
pub trait Chooser {
    /// Pick one of `options`, returning its index.
    fn choose(&mut self, prompt: &str, options: &[String]) -> SelectResult<usize>;

    /// Tell the player something without asking anything.
    fn notify(&mut self, _message: &str) -> SelectResult<()> {
        Ok(())
    }
}

/// Ask `chooser` and reject an index past the end of `options`.
pub fn choose_index(
    chooser: &mut dyn Chooser,
    prompt: &str,
    options: &[String],
) -> SelectResult<usize> {
    let index = chooser.choose(prompt, options)?;
    if index < options.len() {
        Ok(index)
    } else {
        tracing::warn!(index, len = options.len(), "chooser returned an out-of-range index");
        Err(SelectionError::NoOptions)
    }
}

/// Pick one of `values` by their display text.
pub fn choose_value<T: Clone + std::fmt::Display>(
    chooser: &mut dyn Chooser,
    prompt: &str,
    values: &[T],
) -> SelectResult<T> {
    let labels: Vec<String> = values.iter().map(ToString::to_string).collect();
    let index = choose_index(chooser, prompt, &labels)?;
    Ok(values[index].clone())
}

/// Match typed input against the options: either the exact option text or
/// its 1-based position.
pub fn parse_selection(input: &str, options: &[String]) -> SelectResult<usize> {
    let input = input.trim();
    if let Some(index) = options.iter().position(|o| o == input) {
        return Ok(index);
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => Ok(n - 1),
        _ => Err(SelectionError::Invalid(input.to_string())),
    }
}

/// Prompts on a terminal until a valid option is typed.
pub struct PromptChooser<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptChooser<R, W> {
    /// Read answers from `input` and write prompts to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask a free-text question. Returns the trimmed answer.
    pub fn ask(&mut self, prompt: &str) -> SelectResult<String> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SelectionError::Closed);
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Chooser for PromptChooser<R, W> {
    fn choose(&mut self, prompt: &str, options: &[String]) -> SelectResult<usize> {
        if options.is_empty() {
            return Err(SelectionError::NoOptions);
        }
        loop {
            writeln!(self.output, "{prompt}")?;
            for (i, option) in options.iter().enumerate() {
                writeln!(self.output, "  {}. {option}", i + 1)?;
            }
            let answer = self.ask(">")?;
            match parse_selection(&answer, options) {
                Ok(index) => return Ok(index),
                Err(SelectionError::Invalid(text)) => {
                    writeln!(self.output, "'{text}' is not one of the options.")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn notify(&mut self, message: &str) -> SelectResult<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}

/// Picks uniformly at random.
pub struct AutoChooser<S> {
    source: S,
}

impl<S: RandomSource> AutoChooser<S> {
    /// Choose using `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: RandomSource> Chooser for AutoChooser<S> {
    fn choose(&mut self, prompt: &str, options: &[String]) -> SelectResult<usize> {
        if options.is_empty() {
            return Err(SelectionError::NoOptions);
        }
        let index = self.source.choose_index(options.len())?;
        tracing::debug!(prompt, choice = %options[index], "automatic choice");
        Ok(index)
    }

    fn notify(&mut self, message: &str) -> SelectResult<()> {
        tracing::debug!("{message}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_mechanics::ScriptedRandom;

    fn options() -> Vec<String> {
        vec!["Brawn".into(), "Agility".into(), "Willpower".into()]
    }

    #[test]
    fn selection_by_text_or_index() {
        let opts = options();
        assert_eq!(parse_selection("Agility", &opts).unwrap(), 1);
        assert_eq!(parse_selection(" 3 ", &opts).unwrap(), 2);
        assert!(matches!(
            parse_selection("4", &opts),
            Err(SelectionError::Invalid(_))
        ));
        assert!(parse_selection("0", &opts).is_err());
        assert!(parse_selection("agility", &opts).is_err());
    }

    #[test]
    fn prompt_reprompts_on_invalid_input() {
        let input = b"Strength\n9\nWillpower\n";
        let mut output = Vec::new();
        let mut chooser = PromptChooser::new(&input[..], &mut output);
        let index = chooser.choose("Pick one:", &options()).unwrap();
        assert_eq!(index, 2);
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("'Strength' is not one of the options."));
        assert!(printed.contains("'9' is not one of the options."));
        assert_eq!(printed.matches("Pick one:").count(), 3);
    }

    #[test]
    fn prompt_fails_when_input_closes() {
        let mut output = Vec::new();
        let mut chooser = PromptChooser::new(&b""[..], &mut output);
        assert!(matches!(
            chooser.choose("Pick one:", &options()),
            Err(SelectionError::Closed)
        ));
    }

    #[test]
    fn auto_uses_its_source() {
        let mut chooser = AutoChooser::new(ScriptedRandom::new([2, 0]));
        assert_eq!(chooser.choose("", &options()).unwrap(), 2);
        assert_eq!(chooser.choose("", &options()).unwrap(), 0);
    }

    #[test]
    fn empty_options_are_an_error() {
        let mut chooser = AutoChooser::new(ScriptedRandom::new([0]));
        assert!(matches!(
            chooser.choose("", &[]),
            Err(SelectionError::NoOptions)
        ));
    }

    struct PastTheEnd;

    impl Chooser for PastTheEnd {
        fn choose(&mut self, _prompt: &str, options: &[String]) -> SelectResult<usize> {
            Ok(options.len())
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert!(matches!(
            choose_index(&mut PastTheEnd, "", &options()),
            Err(SelectionError::NoOptions)
        ));
        assert!(matches!(
            choose_value(&mut PastTheEnd, "", &[1u32, 2]),
            Err(SelectionError::NoOptions)
        ));
    }

    #[test]
    fn choose_value_maps_back() {
        let mut chooser = AutoChooser::new(ScriptedRandom::new([1]));
        let picked = choose_value(&mut chooser, "", &[10u32, 20, 30]).unwrap();
        assert_eq!(picked, 20);
    }
}
