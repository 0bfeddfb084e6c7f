//! # Schemas Subcommand
//!
//! Lists the registered schema names in registration order, one per line.

use std::io::Write;

use apidecl_schema::Registry;

/// Write every registered schema name to `out`.
pub fn run_schemas(out: &mut dyn Write) -> anyhow::Result<()> {
    for (name, _) in Registry::global().nodes() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_leaves_before_roots() {
        let mut out = Vec::new();
        run_schemas(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let names: Vec<&str> = text.lines().collect();
        assert_eq!(names.len(), 11);
        assert_eq!(names.first(), Some(&"Items"));
        assert_eq!(names.last(), Some(&"APIDeclaration"));
    }
}
