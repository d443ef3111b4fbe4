use super::ILeadRepo;
use crate::repos::shared::inmemory_repo::*;
use herald_domain::{Lead, ID};

pub struct InMemoryLeadRepo {
    leads: std::sync::Mutex<Vec<Lead>>,
}

impl InMemoryLeadRepo {
    pub fn new() -> Self {
        Self {
            leads: std::sync::Mutex::new(vec![]),
        }
    }
}

impl Default for InMemoryLeadRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ILeadRepo for InMemoryLeadRepo {
    async fn insert(&self, lead: &Lead) -> anyhow::Result<()> {
        insert(lead, &self.leads);
        Ok(())
    }

    async fn find(&self, lead_id: &ID) -> Option<Lead> {
        find(lead_id, &self.leads)
    }

    async fn find_many(&self, lead_ids: &[ID]) -> Vec<Lead> {
        find_by(&self.leads, |lead| lead_ids.contains(&lead.id))
    }
}
