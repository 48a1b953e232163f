use crate::prelude::*;

/// Filter granting access to any authenticated caller.
pub const AUTHENTICATED: &str = "@request.auth.id != ''";

///
/// Rule
///
/// Access rule for one record operation.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "rule", content = "filter", rename_all = "snake_case")]
pub enum Rule {
    /// Superusers only.
    Locked,
    /// Anyone, including anonymous callers.
    Public,
    /// Callers matching the filter expression.
    Expr(&'static str),
}

impl Rule {
    /// Store-level filter: `None` locks the operation, an empty filter opens it.
    #[must_use]
    pub const fn filter(self) -> Option<&'static str> {
        match self {
            Self::Locked => None,
            Self::Public => Some(""),
            Self::Expr(expr) => Some(expr),
        }
    }
}

impl ValidateNode for Rule {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Self::Expr(expr) = self
            && expr.trim().is_empty()
        {
            err!(errs, "filter expression is empty; use Rule::Public instead");
        }

        errs.result()
    }
}

///
/// Rules
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Rules {
    pub list: Rule,
    pub view: Rule,
    pub create: Rule,
    pub update: Rule,
    pub delete: Rule,
}

impl Rules {
    /// Same rule for every operation.
    #[must_use]
    pub const fn uniform(rule: Rule) -> Self {
        Self {
            list: rule,
            view: rule,
            create: rule,
            update: rule,
            delete: rule,
        }
    }

    #[must_use]
    pub const fn authenticated() -> Self {
        Self::uniform(Rule::Expr(AUTHENTICATED))
    }

    #[must_use]
    pub const fn get(&self, op: Operation) -> Rule {
        match op {
            Operation::List => self.list,
            Operation::View => self.view,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Operation, Rule)> + '_ {
        Operation::ALL.into_iter().map(|op| (op, self.get(op)))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::uniform(Rule::Locked)
    }
}

impl ValidateNode for Rules {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();
        for (op, rule) in self.iter() {
            if let Err(e) = rule.validate() {
                errs.add_for(op.to_string().to_lowercase(), e);
            }
        }

        errs.result()
    }
}
