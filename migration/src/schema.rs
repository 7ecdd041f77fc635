/// DDL for the document store: one JSONB table keyed by (collection, id),
/// plus an index for the per-collection list scans.
///
/// Statements are idempotent so the migration can run on every deploy.
pub fn statements() -> Vec<String> {
    vec![
        "CREATE TABLE IF NOT EXISTS documents ( \
             collection text NOT NULL, \
             id text NOT NULL, \
             body jsonb NOT NULL DEFAULT '{}'::jsonb, \
             created_at timestamptz NOT NULL DEFAULT now(), \
             updated_at timestamptz NOT NULL DEFAULT now(), \
             PRIMARY KEY (collection, id) \
         )"
        .to_owned(),
        "CREATE INDEX IF NOT EXISTS documents_collection_created_idx \
             ON documents (collection, created_at)"
            .to_owned(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_statement_is_idempotent() {
        for ddl in statements() {
            assert!(ddl.contains("IF NOT EXISTS"), "{ddl}");
        }
    }
}
