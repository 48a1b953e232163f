use crate::{MAX_COLLECTION_NAME_LEN, prelude::*, validate::naming};

///
/// Collection
///
/// Declarative description of one store collection: its name, access rules
/// and ordered field set.
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Collection {
    pub name: &'static str,
    pub rules: Rules,
    pub fields: FieldList,
}

impl Collection {
    /// Names of the collections this one references through relation fields,
    /// in field order, without duplicates.
    #[must_use]
    pub fn dependencies(&self) -> Vec<&'static str> {
        let mut deps: Vec<&'static str> = Vec::new();
        for target in self.fields.iter().filter_map(|f| f.kind.relation_target()) {
            if !deps.contains(&target) {
                deps.push(target);
            }
        }

        deps
    }
}

impl ValidateNode for Collection {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(msg) = naming::check_ident(self.name, MAX_COLLECTION_NAME_LEN) {
            errs.add(msg);
        }
        if self.fields.fields.is_empty() {
            err!(errs, "collection declares no fields");
        }
        if let Err(e) = self.rules.validate() {
            errs.add_for("rules", e);
        }
        if let Err(e) = self.fields.validate() {
            errs.add_for("fields", e);
        }

        errs.result()
    }
}
