//! Parser for verb catalog files.
//!
//! # Format
//! ```text
//! # comment
//! SET: 1
//! arbeide | arbeider | arbeidet | arbeidet | Работать
//! dra, drage | drar, drager | drog | dradd, dratt | Тащить
//! kjenne | kjenner | kjente | kjent | Знать | О человеке/месте
//! ```
//!
//! Verb lines hold infinitive, present, past, perfect, translation and an
//! optional note. Alternative spellings are comma-separated, most used first.

use std::collections::HashSet;

use crate::error::ParseError;
use crate::types::{Answers, Verb, VerbSet};

/// Parse catalog content into verb sets, in file order.
pub fn parse(content: &str) -> Result<Vec<VerbSet>, ParseError> {
    if content.trim().is_empty() {
        return Err(ParseError::EmptyFile);
    }

    let mut parser = Parser::new();

    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }

    parser.finalize()
}

enum LineType<'a> {
    Set(&'a str),
    Verb(&'a str),
    Skip,
}

struct SetBuilder {
    name: String,
    verbs: Vec<Verb>,
    keys: HashSet<String>,
    start_line: usize,
}

impl SetBuilder {
    fn new(name: &str, start_line: usize) -> Self {
        Self {
            name: name.to_string(),
            verbs: Vec::new(),
            keys: HashSet::new(),
            start_line,
        }
    }

    fn push(&mut self, verb: Verb, line: usize) -> Result<(), ParseError> {
        if !self.keys.insert(verb.key().to_string()) {
            return Err(ParseError::DuplicateVerb {
                key: verb.key().to_string(),
                line,
            });
        }
        self.verbs.push(verb);
        Ok(())
    }

    fn build(self) -> Result<VerbSet, ParseError> {
        if self.verbs.is_empty() {
            return Err(ParseError::EmptySet {
                name: self.name,
                line: self.start_line,
            });
        }
        Ok(VerbSet::new(self.name, self.verbs))
    }
}

struct Parser {
    current: Option<SetBuilder>,
    sets: Vec<VerbSet>,
    seen_names: HashSet<String>,
}

impl Parser {
    fn new() -> Self {
        Self {
            current: None,
            sets: Vec::new(),
            seen_names: HashSet::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<(), ParseError> {
        match Self::parse_line(line) {
            LineType::Set(name) => self.handle_set(name, line_num),
            LineType::Verb(text) => self.handle_verb(text, line_num),
            LineType::Skip => Ok(()),
        }
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            LineType::Skip
        } else if let Some(rest) = trimmed.strip_prefix("SET:") {
            LineType::Set(rest.trim())
        } else {
            LineType::Verb(trimmed)
        }
    }

    fn handle_set(&mut self, name: &str, line_num: usize) -> Result<(), ParseError> {
        if name.is_empty() {
            return Err(ParseError::MissingSetName { line: line_num });
        }
        if !self.seen_names.insert(name.to_string()) {
            return Err(ParseError::DuplicateSet {
                name: name.to_string(),
                line: line_num,
            });
        }

        self.flush()?;
        self.current = Some(SetBuilder::new(name, line_num));
        Ok(())
    }

    fn handle_verb(&mut self, text: &str, line_num: usize) -> Result<(), ParseError> {
        let set = self
            .current
            .as_mut()
            .ok_or(ParseError::VerbOutsideSet { line: line_num })?;

        let fields: Vec<&str> = text.split('|').map(str::trim).collect();
        if !(5..=6).contains(&fields.len()) {
            return Err(ParseError::FieldCount {
                line: line_num,
                found: fields.len(),
            });
        }

        let translation = fields[4];
        if translation.is_empty() {
            return Err(ParseError::EmptyField {
                line: line_num,
                field: "translation",
            });
        }

        let mut verb = Verb::new(
            parse_answers(fields[0], "infinitive", line_num)?,
            parse_answers(fields[1], "present", line_num)?,
            parse_answers(fields[2], "past", line_num)?,
            parse_answers(fields[3], "perfect", line_num)?,
            translation,
        );

        if let Some(note) = fields.get(5).filter(|note| !note.is_empty()) {
            verb = verb.with_note(*note);
        }

        set.push(verb, line_num)
    }

    fn flush(&mut self) -> Result<(), ParseError> {
        if let Some(set) = self.current.take() {
            self.sets.push(set.build()?);
        }
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<VerbSet>, ParseError> {
        self.flush()?;
        Ok(self.sets)
    }
}

/// Split a form field into lower-cased variants.
fn parse_answers(field: &str, name: &'static str, line: usize) -> Result<Answers, ParseError> {
    let variants = field
        .split(',')
        .map(|v| v.trim().to_lowercase())
        .collect::<Vec<_>>();

    if variants.iter().any(String::is_empty) {
        return Err(ParseError::EmptyField { line, field: name });
    }

    Answers::new(variants).ok_or(ParseError::EmptyField { line, field: name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_single_set() {
        let content = "SET: 1\narbeide | arbeider | arbeidet | arbeidet | Работать\n";
        let sets = parse(content).unwrap();

        assert_eq!(
            sets,
            vec![VerbSet::new(
                "1",
                vec![Verb::new("arbeide", "arbeider", "arbeidet", "arbeidet", "Работать")]
            )]
        );
    }

    #[test]
    fn test_parse_variants_and_note() {
        let content = r#"
# irregulars
SET: 3
dra, drage | drar, drager | drog | dradd, dratt | Тащить
kjenne | kjenner | kjente | kjent | Знать | О человеке/месте
"#;
        let sets = parse(content).unwrap();
        let verbs = &sets[0].verbs;

        assert_eq!(verbs[0].infinitive.variants(), ["dra", "drage"]);
        assert_eq!(verbs[0].perfect.variants(), ["dradd", "dratt"]);
        assert_eq!(verbs[0].note, None);
        assert_eq!(verbs[1].note.as_deref(), Some("О человеке/месте"));
    }

    #[test]
    fn test_parse_lowercases_forms_but_not_translation() {
        let sets = parse("SET: x\nGå | Går | Gikk | Gått | Идти").unwrap();
        let verb = &sets[0].verbs[0];

        assert_eq!(verb.infinitive.canonical(), "gå");
        assert_eq!(verb.perfect.canonical(), "gått");
        assert_eq!(verb.translation, "Идти");
    }

    #[test]
    fn test_parse_multiple_sets_keep_order() {
        let content = "SET: b\nbo | bor | bodde | bodd | Проживать\nSET: a\nta | tar | tok | tatt | Брать\n";
        let names: Vec<String> = parse(content).unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(parse(""), Err(ParseError::EmptyFile));
        assert_eq!(parse("   \n\n"), Err(ParseError::EmptyFile));
    }

    #[test]
    fn test_verb_before_set() {
        let result = parse("bo | bor | bodde | bodd | Проживать");
        assert_eq!(result, Err(ParseError::VerbOutsideSet { line: 1 }));
    }

    #[test]
    fn test_wrong_field_count() {
        let result = parse("SET: 1\nbo | bor | bodde | Проживать");
        assert_eq!(result, Err(ParseError::FieldCount { line: 2, found: 4 }));
    }

    #[test]
    fn test_empty_variant() {
        let result = parse("SET: 1\nbo | bor | bodde, | bodd | Проживать");
        assert_eq!(
            result,
            Err(ParseError::EmptyField {
                line: 2,
                field: "past"
            })
        );
    }

    #[test]
    fn test_empty_translation() {
        let result = parse("SET: 1\nbo | bor | bodde | bodd |  ");
        assert_eq!(
            result,
            Err(ParseError::EmptyField {
                line: 2,
                field: "translation"
            })
        );
    }

    #[test]
    fn test_missing_set_name() {
        assert_eq!(parse("SET:\n"), Err(ParseError::MissingSetName { line: 1 }));
    }

    #[test]
    fn test_duplicate_set() {
        let content = "SET: 1\nbo | bor | bodde | bodd | Проживать\nSET: 1\nta | tar | tok | tatt | Брать";
        assert_eq!(
            parse(content),
            Err(ParseError::DuplicateSet {
                name: "1".to_string(),
                line: 3
            })
        );
    }

    #[test]
    fn test_duplicate_verb_in_set() {
        let content = "SET: 1\nbo | bor | bodde | bodd | Проживать\nbo | bor | bodde | bodd | Жить";
        assert_eq!(
            parse(content),
            Err(ParseError::DuplicateVerb {
                key: "bo".to_string(),
                line: 3
            })
        );
    }

    #[test]
    fn test_set_without_verbs() {
        let content = "SET: 1\nSET: 2\nta | tar | tok | tatt | Брать";
        assert_eq!(
            parse(content),
            Err(ParseError::EmptySet {
                name: "1".to_string(),
                line: 1
            })
        );
    }
}
