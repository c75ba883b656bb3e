use thiserror::Error;

const INSERT_PREFIX: &str = "INSERT";
const VALUES_PREFIX: &str = "VALUES(";
const FIELD_MARKER: &str = "',";
const TAIL: [char; 4] = [')', ';', '\r', '\n'];
const QUOTING: [char; 2] = ['\\', '\''];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("expected `INSERT INTO <table> VALUES(...)`, found fewer than four tokens")]
    MissingValues,
    #[error("value list has fewer than three columns")]
    MissingColumns,
    #[error("third column has no `',` marker")]
    MissingMarker
}

/// Pulls the wanted field out of one dump line.
///
/// Lines that don't start with `INSERT` give `Ok(None)`. The field is whatever follows the
/// first `',` inside the third column, with backslashes and single quotes trimmed from both ends.
pub fn extract(line: &str) -> Result<Option<&str>, ShapeError> {
    if !line.starts_with(INSERT_PREFIX) {
        return Ok(None);
    }

    let list = values_clause(line)?.trim_end_matches(TAIL);
    let list = list.strip_prefix(VALUES_PREFIX).unwrap_or(list);

    // everything past the second comma, commas and all
    let third = list.splitn(3, ',').nth(2).ok_or(ShapeError::MissingColumns)?;
    let (_, field) = third.split_once(FIELD_MARKER).ok_or(ShapeError::MissingMarker)?;

    Ok(Some(field.trim_matches(QUOTING)))
}

// drops `INSERT`, `INTO` and the table name; the rest keeps its trailing whitespace
fn values_clause(line: &str) -> Result<&str, ShapeError> {
    let mut rest = line;
    for _ in 0..3 {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace).ok_or(ShapeError::MissingValues)?;
        rest = &rest[end..];
    }

    match rest.trim_start() {
        "" => Err(ShapeError::MissingValues),
        rest => Ok(rest)
    }
}
