use crate::{err, error::ErrorTree, node::Schema};
use std::collections::BTreeSet;

/// Check a schema identifier: non-empty, lowercase snake case, starts with a
/// letter, bounded length.
pub fn check_ident(ident: &str, max_len: usize) -> Result<(), String> {
    let Some(first) = ident.chars().next() else {
        return Err("identifier is empty".to_string());
    };

    if ident.len() > max_len {
        return Err(format!(
            "identifier '{ident}' is {} bytes, limit is {max_len}",
            ident.len()
        ));
    }
    if !first.is_ascii_lowercase() {
        return Err(format!("identifier '{ident}' must start with a lowercase letter"));
    }
    if let Some(bad) = ident
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
    {
        return Err(format!(
            "identifier '{ident}' contains '{bad}'; use lowercase snake case"
        ));
    }

    Ok(())
}

// Collection names are the store lookup key and must be unique.
pub(crate) fn validate_unique_collections(schema: &Schema, errs: &mut ErrorTree) {
    let mut seen = BTreeSet::new();
    for collection in schema.collections {
        if !seen.insert(collection.name) {
            err!(errs, "collection '{}' is declared more than once", collection.name);
        }
    }
}
