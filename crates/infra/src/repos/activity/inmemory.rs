use super::IActivityRepo;
use crate::repos::shared::inmemory_repo::*;
use herald_domain::{Activity, ActivityStatus, ID};

pub struct InMemoryActivityRepo {
    activities: std::sync::Mutex<Vec<Activity>>,
}

impl InMemoryActivityRepo {
    pub fn new() -> Self {
        Self {
            activities: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryActivityRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IActivityRepo for InMemoryActivityRepo {
    async fn insert(&self, activity: &Activity) -> anyhow::Result<()> {
        insert(activity, &self.activities);
        Ok(())
    }

    async fn save(&self, activity: &Activity) -> anyhow::Result<()> {
        save(activity, &self.activities);
        Ok(())
    }

    async fn find(&self, activity_id: &ID) -> Option<Activity> {
        find(activity_id, &self.activities)
    }

    async fn find_todo_scheduled_between(
        &self,
        start: i64,
        end: i64,
    ) -> anyhow::Result<Vec<Activity>> {
        let res = find_by(&self.activities, |activity| {
            activity.status == ActivityStatus::Todo
                && activity
                    .scheduled_at
                    .map(|scheduled_at| start <= scheduled_at && scheduled_at <= end)
                    .unwrap_or(false)
        });
        Ok(res)
    }

    async fn find_by_user_scheduled_between(
        &self,
        user_id: &ID,
        start: i64,
        end: i64,
    ) -> anyhow::Result<Vec<Activity>> {
        let res = find_by(&self.activities, |activity| {
            activity.assigned_to == *user_id
                && activity
                    .scheduled_at
                    .map(|scheduled_at| start <= scheduled_at && scheduled_at < end)
                    .unwrap_or(false)
        });
        Ok(res)
    }
}
