use crate::{error::ErrorTree, node::Schema};

// Relations must point at other declared collections and the relation graph
// must admit a creation order.
pub(crate) fn validate_relations(schema: &Schema, errs: &mut ErrorTree) {
    let mut unresolved = false;
    for collection in schema.collections {
        for field in collection.fields.iter() {
            let Some(target) = field.kind.relation_target() else {
                continue;
            };

            let mut field_errs = ErrorTree::new();
            if target == collection.name {
                crate::err!(
                    field_errs,
                    "relation cannot target its own collection '{target}'"
                );
            } else if schema.get(target).is_none() {
                crate::err!(
                    field_errs,
                    "relation targets undeclared collection '{target}'"
                );
            }

            if !field_errs.is_empty() {
                unresolved = true;

                let mut fields = ErrorTree::new();
                fields.add_for(field.ident, field_errs);
                let mut coll_errs = ErrorTree::new();
                coll_errs.add_for("fields", fields);
                errs.add_for(collection.name, coll_errs);
            }
        }
    }

    // ordering is only meaningful once every target resolves
    if !unresolved && let Err(e) = schema.ordered() {
        errs.add(e);
    }
}

#[cfg(test)]
mod tests {
    use crate::{node::*, types::FieldKind};

    const ORPHAN_FIELDS: &[Field] = &[Field::optional(
        "owner",
        FieldKind::Relation {
            target: "ghost",
            max_select: 1,
        },
    )];

    const SELFISH_FIELDS: &[Field] = &[Field::optional(
        "parent",
        FieldKind::Relation {
            target: "selfish",
            max_select: 1,
        },
    )];

    #[test]
    fn self_relation_is_reported_on_the_field() {
        static COLLS: &[Collection] = &[Collection {
            name: "selfish",
            rules: Rules::uniform(Rule::Public),
            fields: FieldList {
                fields: SELFISH_FIELDS,
            },
        }];
        let schema = Schema { collections: COLLS };

        let Err(crate::Error::Validation(tree)) = schema.validate() else {
            panic!("schema should be invalid");
        };
        let flat = tree.flatten();

        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].0, "selfish.fields.parent");
        assert!(flat[0].1.contains("own collection"));
    }

    #[test]
    fn undeclared_target_is_reported_on_the_field() {
        static COLLS: &[Collection] = &[Collection {
            name: "orphan",
            rules: Rules::uniform(Rule::Public),
            fields: FieldList {
                fields: ORPHAN_FIELDS,
            },
        }];
        let schema = Schema { collections: COLLS };

        let Err(crate::Error::Validation(tree)) = schema.validate() else {
            panic!("schema should be invalid");
        };
        let flat = tree.flatten();

        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].0, "orphan.fields.owner");
    }
}
