use super::IReminderEventRepo;
use herald_domain::{ReminderEvent, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderEventRepo {
    pool: PgPool,
}

impl PostgresReminderEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderEventRaw {
    dedupe_key: String,
    reminder_type: String,
    activity_uid: Option<Uuid>,
    user_uid: Uuid,
    digest_date: Option<String>,
    sent_at: i64,
}

impl Into<ReminderEvent> for ReminderEventRaw {
    fn into(self) -> ReminderEvent {
        ReminderEvent {
            dedupe_key: self.dedupe_key,
            // Rows are only ever written through this repo, so the stored
            // type is always one of ours
            reminder_type: self
                .reminder_type
                .parse()
                .expect("reminder_events to hold a known reminder type"),
            activity_id: self.activity_uid.map(ID::from),
            user_id: self.user_uid.into(),
            digest_date: self.digest_date,
            sent_at: self.sent_at,
        }
    }
}

#[async_trait::async_trait]
impl IReminderEventRepo for PostgresReminderEventRepo {
    async fn try_claim(&self, event: &ReminderEvent) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO reminder_events
            (dedupe_key, reminder_type, activity_uid, user_uid, digest_date, sent_at)
            VALUES($1, $2, $3, $4, $5, $6)
            ON CONFLICT (dedupe_key) DO NOTHING
            "#,
        )
        .bind(&event.dedupe_key)
        .bind(event.reminder_type.as_str())
        .bind(event.activity_id.as_ref().map(|id| *id.inner_ref()))
        .bind(event.user_id.inner_ref())
        .bind(event.digest_date.as_deref())
        .bind(event.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn exists(&self, dedupe_key: &str) -> bool {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reminder_events AS r
                WHERE r.dedupe_key = $1
            )
            "#,
        )
        .bind(dedupe_key)
        .fetch_one(&self.pool)
        .await
        .unwrap_or(false)
    }

    async fn release(&self, dedupe_key: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM reminder_events AS r
            WHERE r.dedupe_key = $1
            "#,
        )
        .bind(dedupe_key)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_key(&self, dedupe_key: &str) -> Option<ReminderEvent> {
        match sqlx::query_as::<_, ReminderEventRaw>(
            r#"
            SELECT * FROM reminder_events AS r
            WHERE r.dedupe_key = $1
            "#,
        )
        .bind(dedupe_key)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(Some(event)) => Some(event.into()),
            _ => None,
        }
    }
}
