use super::IActivityRepo;
use herald_domain::{Activity, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresActivityRepo {
    pool: PgPool,
}

impl PostgresActivityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActivityRaw {
    activity_uid: Uuid,
    account_uid: Uuid,
    activity_type: String,
    title: String,
    scheduled_at: Option<i64>,
    status: String,
    assigned_to_uid: Uuid,
    lead_uid: Uuid,
}

impl Into<Activity> for ActivityRaw {
    fn into(self) -> Activity {
        Activity {
            id: self.activity_uid.into(),
            account_id: self.account_uid.into(),
            activity_type: self.activity_type.as_str().into(),
            title: self.title,
            scheduled_at: self.scheduled_at,
            status: self.status.as_str().into(),
            assigned_to: self.assigned_to_uid.into(),
            lead_id: self.lead_uid.into(),
        }
    }
}

#[async_trait::async_trait]
impl IActivityRepo for PostgresActivityRepo {
    async fn insert(&self, activity: &Activity) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO activities
            (activity_uid, account_uid, activity_type, title, scheduled_at, status, assigned_to_uid, lead_uid)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(activity.id.inner_ref())
        .bind(activity.account_id.inner_ref())
        .bind(activity.activity_type.as_str())
        .bind(&activity.title)
        .bind(activity.scheduled_at)
        .bind(activity.status.as_str())
        .bind(activity.assigned_to.inner_ref())
        .bind(activity.lead_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, activity: &Activity) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE activities
            SET activity_type = $2,
            title = $3,
            scheduled_at = $4,
            status = $5,
            assigned_to_uid = $6,
            lead_uid = $7
            WHERE activity_uid = $1
            "#,
        )
        .bind(activity.id.inner_ref())
        .bind(activity.activity_type.as_str())
        .bind(&activity.title)
        .bind(activity.scheduled_at)
        .bind(activity.status.as_str())
        .bind(activity.assigned_to.inner_ref())
        .bind(activity.lead_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, activity_id: &ID) -> Option<Activity> {
        match sqlx::query_as::<_, ActivityRaw>(
            r#"
            SELECT * FROM activities AS a
            WHERE a.activity_uid = $1
            "#,
        )
        .bind(activity_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(Some(activity)) => Some(activity.into()),
            _ => None,
        }
    }

    async fn find_todo_scheduled_between(
        &self,
        start: i64,
        end: i64,
    ) -> anyhow::Result<Vec<Activity>> {
        let activities: Vec<ActivityRaw> = sqlx::query_as::<_, ActivityRaw>(
            r#"
            SELECT * FROM activities AS a
            WHERE a.status = 'todo' AND
            a.scheduled_at BETWEEN $1 AND $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities.into_iter().map(|a| a.into()).collect())
    }

    async fn find_by_user_scheduled_between(
        &self,
        user_id: &ID,
        start: i64,
        end: i64,
    ) -> anyhow::Result<Vec<Activity>> {
        let activities: Vec<ActivityRaw> = sqlx::query_as::<_, ActivityRaw>(
            r#"
            SELECT * FROM activities AS a
            WHERE a.assigned_to_uid = $1 AND
            a.scheduled_at >= $2 AND
            a.scheduled_at < $3
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities.into_iter().map(|a| a.into()).collect())
    }
}
