use crate::{MAX_FIELD_NAME_LEN, RESERVED_ID_FIELD, prelude::*, validate::naming};
use std::collections::BTreeSet;

///
/// FieldList
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct FieldList {
    pub fields: &'static [Field],
}

impl FieldList {
    // get
    #[must_use]
    pub fn get(&self, ident: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.ident == ident)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Field> {
        self.fields.iter()
    }
}

impl ValidateNode for FieldList {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();
        let mut seen = BTreeSet::new();

        for field in self.fields {
            if !seen.insert(field.ident) {
                err!(errs, "duplicate field '{}'", field.ident);
            }
            if let Err(e) = field.validate() {
                errs.add_for(field.ident, e);
            }
        }

        errs.result()
    }
}

///
/// Field
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Field {
    pub ident: &'static str,
    pub kind: FieldKind,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl Field {
    /// Optional field of the given kind.
    #[must_use]
    pub const fn optional(ident: &'static str, kind: FieldKind) -> Self {
        Self {
            ident,
            kind,
            required: false,
        }
    }
}

impl ValidateNode for Field {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(msg) = naming::check_ident(self.ident, MAX_FIELD_NAME_LEN) {
            errs.add(msg);
        }
        if self.ident == RESERVED_ID_FIELD {
            err!(errs, "'{RESERVED_ID_FIELD}' is reserved for the record identifier");
        }

        match self.kind {
            FieldKind::Select { values } => {
                if values.is_empty() {
                    err!(errs, "select field declares no values");
                }
                let mut seen = BTreeSet::new();
                for value in values {
                    if !seen.insert(*value) {
                        err!(errs, "duplicate select value '{value}'");
                    }
                }
            }
            FieldKind::Relation { max_select, .. } => {
                if max_select == 0 {
                    err!(errs, "relation max_select must be at least 1");
                }
            }
            FieldKind::Autodate {
                on_create,
                on_update,
            } => {
                if !on_create && !on_update {
                    err!(errs, "autodate field never fires; set on_create or on_update");
                }
                if self.required {
                    err!(errs, "autodate fields are store-managed and cannot be required");
                }
            }
            FieldKind::Editor | FieldKind::Number | FieldKind::Text => {}
        }

        errs.result()
    }
}
