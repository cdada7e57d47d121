use std::io::Write;

use anyhow::Result;
use termdex::DocumentId;

/// Format query hits as one comma-joined line, ids ascending.
pub fn format_ids<I: IntoIterator<Item = DocumentId>>(ids: I) -> String {
    let mut ids: Vec<DocumentId> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Write one result line to the result channel.
pub fn write_ids<W: Write, I: IntoIterator<Item = DocumentId>>(out: &mut W, ids: I) -> Result<()> {
    writeln!(out, "{}", format_ids(ids))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ids() {
        assert_eq!(format_ids(vec![9, 2, 3]), "2,3,9");
        assert_eq!(format_ids(vec![4]), "4");
        assert_eq!(format_ids(Vec::new()), "");
    }

    #[test]
    fn test_write_ids() {
        let mut out = Vec::new();
        write_ids(&mut out, vec![3, 1]).unwrap();
        write_ids(&mut out, Vec::new()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1,3\n\n");
    }
}
