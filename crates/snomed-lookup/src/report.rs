//! Runs a [`Command`] and writes the rendered concepts.

use std::io::Write;

use snomed_finder::{ConceptFinder, RowSource};
use snomed_types::{Concept, SctId};

use crate::{Command, LookupError};

/// Executes `command` against `finder`, writing the report to `out`.
pub fn run<S, W>(
    finder: &ConceptFinder<S>,
    command: &Command,
    out: &mut W,
) -> Result<(), LookupError>
where
    S: RowSource,
    W: Write,
{
    match command {
        Command::Id(id) => {
            let concept = finder.find_by_id(*id)?;
            write_single(out, *id, concept.as_ref())
        }
        Command::Term(fragment) => {
            let concepts = finder.find_by_term(fragment)?;
            write_list(out, &concepts, finder.is_limited(concepts.len()))
        }
        Command::Refset(refset_id) => {
            let concepts = finder.find_refset_members(*refset_id)?;
            write_list(out, &concepts, finder.is_limited(concepts.len()))
        }
    }
}

/// Writes one concept, or a not-found line when `concept` is `None`.
pub fn write_single<W: Write>(
    out: &mut W,
    id: SctId,
    concept: Option<&Concept>,
) -> Result<(), LookupError> {
    match concept {
        Some(concept) => write!(out, "{}", concept)?,
        None => writeln!(out, "No concept found with SCT ID {}", id)?,
    }
    Ok(())
}

/// Writes each concept preceded by a `Concept i of n` heading.
pub fn write_list<W: Write>(
    out: &mut W,
    concepts: &[Concept],
    limited: bool,
) -> Result<(), LookupError> {
    if concepts.is_empty() {
        writeln!(out, "No suitable concepts found!")?;
        return Ok(());
    }

    let suffix = if limited { " (limited)" } else { "" };
    for (i, concept) in concepts.iter().enumerate() {
        writeln!(out, "Concept {} of {}{}", i + 1, concepts.len(), suffix)?;
        write!(out, "{}", concept)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snomed_finder::SqliteSource;
    use snomed_types::ConceptBuilder;

    const PREFERRED: SctId = 900000000000548007;

    fn concept(id: SctId, term: &str) -> Concept {
        let mut builder = ConceptBuilder::new(id);
        builder.add_description(term, Some(PREFERRED));
        builder.build()
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<(), LookupError>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_single_not_found() {
        let text = output(|out| write_single(out, 370127007, None));
        assert_eq!(text, "No concept found with SCT ID 370127007\n");
    }

    #[test]
    fn test_single_found() {
        let heart = concept(80891009, "Heart structure");
        let text = output(|out| write_single(out, 80891009, Some(&heart)));
        assert_eq!(text, "SCT ID 80891009\n\tHeart structure [EN-AU PREFERRED TERM]\n\n");
    }

    #[test]
    fn test_empty_list() {
        let text = output(|out| write_list(out, &[], false));
        assert_eq!(text, "No suitable concepts found!\n");
    }

    #[test]
    fn test_list_headings() {
        let concepts = vec![concept(2, "Beta"), concept(1, "Alpha")];

        let text = output(|out| write_list(out, &concepts, false));
        assert!(text.starts_with("Concept 1 of 2\nSCT ID 2\n"));
        assert!(text.contains("Concept 2 of 2\nSCT ID 1\n"));

        let text = output(|out| write_list(out, &concepts, true));
        assert!(text.starts_with("Concept 1 of 2 (limited)\n"));
    }

    #[test]
    fn test_run_reports_storage_failure() {
        // No schema, so the first query fails
        let finder = ConceptFinder::new(SqliteSource::open_in_memory().unwrap());
        let mut buf = Vec::new();

        let err = run(&finder, &Command::Term("heart".to_string()), &mut buf).unwrap_err();
        assert!(matches!(err, LookupError::Finder(_)));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_run_against_database() {
        let source = SqliteSource::open_in_memory().unwrap().with_max_rows(1);
        source
            .execute_batch(
                "CREATE TABLE concepts (id INTEGER, effectivetime TEXT, active INTEGER);
                 CREATE TABLE descriptions (id INTEGER, effectivetime TEXT, active INTEGER,
                     conceptid INTEGER, term TEXT);
                 CREATE TABLE description_refset (id TEXT, effectivetime TEXT, active INTEGER,
                     refsetid INTEGER, referenceddescriptionid INTEGER, valueid INTEGER);
                 CREATE TABLE concept_refset (id TEXT, effectivetime TEXT, active INTEGER,
                     refsetid INTEGER, referencedconceptid INTEGER);
                 INSERT INTO concepts VALUES (10, '20020131', 1), (11, '20020131', 1);
                 INSERT INTO descriptions VALUES
                     (100, '20020131', 1, 10, 'Heart structure'),
                     (110, '20020131', 1, 11, 'Heart valve structure');",
            )
            .unwrap();
        let finder = ConceptFinder::new(source);

        let text = output(|out| run(&finder, &Command::Term("heart".to_string()), out));
        assert_eq!(text, "Concept 1 of 1 (limited)\nSCT ID 11\n\tHeart valve structure\n\n");

        let text = output(|out| run(&finder, &Command::Id(12), out));
        assert_eq!(text, "No concept found with SCT ID 12\n");

        let text = output(|out| run(&finder, &Command::Refset(10), out));
        assert_eq!(text, "No suitable concepts found!\n");
    }
}
