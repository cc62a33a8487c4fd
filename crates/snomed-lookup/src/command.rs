//! Command-line parsing.

use snomed_types::SctId;

use crate::LookupError;

/// Usage line printed on argument errors.
pub const USAGE: &str = "usage: snomed-lookup (id <sctid> | term <fragment> | refset <sctid>)";

/// A single lookup requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Look up one concept by SCT ID.
    Id(SctId),
    /// Search active descriptions for a term fragment.
    Term(String),
    /// List active members of a reference set.
    Refset(SctId),
}

impl Command {
    /// Parses the arguments following the program name.
    ///
    /// Remaining words after `term` are joined with single spaces, so
    /// `term heart structure` searches for `heart structure`.
    pub fn parse<I, A>(args: I) -> Result<Self, LookupError>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let name = args.next().ok_or_else(|| usage("missing command"))?;
        let rest: Vec<String> = args.collect();

        match name.as_str() {
            "id" => parse_id(&rest).map(Command::Id),
            "refset" => parse_id(&rest).map(Command::Refset),
            "term" => {
                let fragment = rest.join(" ");
                if fragment.is_empty() {
                    Err(usage("term needs a fragment"))
                } else {
                    Ok(Command::Term(fragment))
                }
            }
            other => Err(usage(&format!("unknown command '{}'", other))),
        }
    }
}

fn parse_id(rest: &[String]) -> Result<SctId, LookupError> {
    match rest {
        [value] => value
            .parse()
            .map_err(|_| LookupError::InvalidId(value.clone())),
        [] => Err(usage("missing SCT ID")),
        _ => Err(usage("expected a single SCT ID")),
    }
}

fn usage(reason: &str) -> LookupError {
    LookupError::Usage(format!("{}\n{}", reason, USAGE))
}
