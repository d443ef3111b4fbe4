use super::IReminderEventRepo;
use herald_domain::ReminderEvent;

pub struct InMemoryReminderEventRepo {
    events: std::sync::Mutex<Vec<ReminderEvent>>,
}

impl InMemoryReminderEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(vec![]),
        }
    }
}

impl Default for InMemoryReminderEventRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderEventRepo for InMemoryReminderEventRepo {
    async fn try_claim(&self, event: &ReminderEvent) -> anyhow::Result<bool> {
        // The single lock around check and insert is what makes the claim
        // atomic here, like the unique index does for postgres
        let mut events = self.events.lock().unwrap();
        if events.iter().any(|e| e.dedupe_key == event.dedupe_key) {
            return Ok(false);
        }
        events.push(event.clone());
        Ok(true)
    }

    async fn exists(&self, dedupe_key: &str) -> bool {
        let events = self.events.lock().unwrap();
        events.iter().any(|e| e.dedupe_key == dedupe_key)
    }

    async fn release(&self, dedupe_key: &str) -> anyhow::Result<()> {
        let mut events = self.events.lock().unwrap();
        events.retain(|e| e.dedupe_key != dedupe_key);
        Ok(())
    }

    async fn find_by_key(&self, dedupe_key: &str) -> Option<ReminderEvent> {
        let events = self.events.lock().unwrap();
        events.iter().find(|e| e.dedupe_key == dedupe_key).cloned()
    }
}
