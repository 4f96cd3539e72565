//! Line-based interactive selection.
//!
//! Each question lists the choices, shows the default in brackets and reads
//! one line. An empty answer keeps the default. Choices may be given by number
//! or id, separated by commas or spaces.

use std::io::{self, BufRead, Write};

use crate::adapters::{target, OutputMode, TargetId};
use crate::templates::CATEGORIES;

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks which targets to generate for. Unknown entries are ignored; an
    /// answer with no known entry keeps `default`.
    pub fn targets(&mut self, default: &[TargetId]) -> io::Result<Vec<TargetId>> {
        writeln!(self.output, "Which assistants should receive security rules?")?;
        for (i, id) in TargetId::ALL.iter().enumerate() {
            writeln!(self.output, "  {}) {:<9} {}", i + 1, id.as_str(), target(*id).name)?;
        }
        let shown: Vec<&str> = default.iter().map(|t| t.as_str()).collect();
        let answer = self.ask(&shown.join(","))?;

        let picked = pick(&answer, TargetId::ALL.len(), |token| TargetId::parse(token));
        let picked: Vec<TargetId> = picked
            .into_iter()
            .map(|i| match i {
                Choice::Index(i) => TargetId::ALL[i],
                Choice::Value(id) => id,
            })
            .collect();
        Ok(if picked.is_empty() {
            default.to_vec()
        } else {
            picked
        })
    }

    /// Asks which categories to include, defaulting to `default`.
    pub fn categories(&mut self, default: &[String]) -> io::Result<Vec<String>> {
        writeln!(self.output, "Which rule categories should be included?")?;
        for (i, c) in CATEGORIES.iter().enumerate() {
            writeln!(
                self.output,
                "  {:>2}) {} {:<22} {}",
                i + 1,
                c.display_code(),
                c.id,
                c.title
            )?;
        }
        let shown = if default.len() == CATEGORIES.len() {
            "all".to_string()
        } else {
            default.join(",")
        };
        let answer = self.ask(&shown)?;
        if answer.eq_ignore_ascii_case("all") {
            return Ok(CATEGORIES.iter().map(|c| c.id.to_string()).collect());
        }

        let picked: Vec<String> = pick(&answer, CATEGORIES.len(), |token| {
            CATEGORIES.iter().find(|c| c.id == token).map(|c| c.id)
        })
        .into_iter()
        .map(|choice| match choice {
            Choice::Index(i) => CATEGORIES[i].id.to_string(),
            Choice::Value(id) => id.to_string(),
        })
        .collect();
        Ok(if picked.is_empty() {
            default.to_vec()
        } else {
            picked
        })
    }

    /// Asks for inline or directory output.
    pub fn mode(&mut self, default: OutputMode) -> io::Result<OutputMode> {
        writeln!(
            self.output,
            "Embed rules in the main instructions file (inline) or write one file per category (directory)?"
        )?;
        let shown = match default {
            OutputMode::Inline => "inline",
            OutputMode::Directory => "directory",
        };
        let answer = self.ask(shown)?.to_lowercase();
        Ok(match answer.as_str() {
            "inline" | "i" => OutputMode::Inline,
            "directory" | "dir" | "d" => OutputMode::Directory,
            _ => default,
        })
    }

    /// Asks for the framework label.
    pub fn framework(&mut self, default: &str) -> io::Result<String> {
        writeln!(self.output, "Which framework does this project use?")?;
        let answer = self.ask(default)?;
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer
        })
    }

    /// Prints the prompt with `default` and returns the trimmed answer. End of
    /// input counts as an empty answer.
    fn ask(&mut self, default: &str) -> io::Result<String> {
        write!(self.output, "[{default}] > ")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

enum Choice<T> {
    Index(usize),
    Value(T),
}

/// Splits an answer into tokens and resolves each as a 1-based number below
/// `count` or through `lookup`. Unresolvable tokens and repeats are dropped.
fn pick<T: PartialEq>(
    answer: &str,
    count: usize,
    lookup: impl Fn(&str) -> Option<T>,
) -> Vec<Choice<T>> {
    let mut out: Vec<Choice<T>> = Vec::new();
    let mut seen_index = Vec::new();
    for token in answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        let choice = match token.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Choice::Index(n - 1),
            Ok(_) => continue,
            Err(_) => match lookup(&token.to_lowercase()) {
                Some(value) => Choice::Value(value),
                None => continue,
            },
        };
        let duplicate = match &choice {
            Choice::Index(i) => seen_index.contains(i),
            Choice::Value(v) => out
                .iter()
                .any(|c| matches!(c, Choice::Value(existing) if existing == v)),
        };
        if !duplicate {
            if let Choice::Index(i) = choice {
                seen_index.push(i);
            }
            out.push(choice);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_targets_by_number_and_name() {
        let mut p = prompter("1, cursor\n");
        let targets = p.targets(&[TargetId::Claude]).unwrap();
        assert_eq!(targets, [TargetId::Claude, TargetId::Cursor]);

        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("windsurf"));
        assert!(shown.contains("[claude] > "));
    }

    #[test]
    fn test_empty_answer_keeps_default() {
        let mut p = prompter("\n");
        assert_eq!(
            p.targets(&[TargetId::Gemini]).unwrap(),
            [TargetId::Gemini]
        );
    }

    #[test]
    fn test_unknown_answer_keeps_default() {
        let mut p = prompter("vim 42\n");
        assert_eq!(
            p.targets(&[TargetId::Agents]).unwrap(),
            [TargetId::Agents]
        );
    }

    #[test]
    fn test_categories() {
        let all: Vec<String> = CATEGORIES.iter().map(|c| c.id.to_string()).collect();

        let mut p = prompter("injection 6 injection\n");
        assert_eq!(p.categories(&all).unwrap(), ["injection", "ssrf"]);

        let mut p = prompter("ALL\n");
        assert_eq!(p.categories(&["ssrf".to_string()]).unwrap(), all);
    }

    #[test]
    fn test_mode_and_framework() {
        let mut p = prompter("d\nnextjs\n");
        assert_eq!(p.mode(OutputMode::Inline).unwrap(), OutputMode::Directory);
        assert_eq!(p.framework("react").unwrap(), "nextjs");
    }

    #[test]
    fn test_end_of_input_uses_defaults() {
        let mut p = prompter("");
        assert_eq!(p.mode(OutputMode::Directory).unwrap(), OutputMode::Directory);
        assert_eq!(p.framework("vanilla").unwrap(), "vanilla");
    }
}
