use crate::shared::entity::{Entity, ID};

/// A `Lead` is the contact an `Activity` revolves around. Only the
/// fields that show up in notification bodies live here.
#[derive(Debug, Clone)]
pub struct Lead {
    pub id: ID,
    pub account_id: ID,
    pub full_name: String,
    pub phone: Option<String>,
}

impl Lead {
    pub fn new(account_id: ID, full_name: String) -> Self {
        Self {
            id: Default::default(),
            account_id,
            full_name,
            phone: None,
        }
    }
}

impl Entity for Lead {
    fn id(&self) -> &ID {
        &self.id
    }
}
