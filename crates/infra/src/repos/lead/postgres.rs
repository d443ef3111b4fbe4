use super::ILeadRepo;
use herald_domain::{Lead, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresLeadRepo {
    pool: PgPool,
}

impl PostgresLeadRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LeadRaw {
    lead_uid: Uuid,
    account_uid: Uuid,
    full_name: String,
    phone: Option<String>,
}

impl Into<Lead> for LeadRaw {
    fn into(self) -> Lead {
        Lead {
            id: self.lead_uid.into(),
            account_id: self.account_uid.into(),
            full_name: self.full_name,
            phone: self.phone,
        }
    }
}

#[async_trait::async_trait]
impl ILeadRepo for PostgresLeadRepo {
    async fn insert(&self, lead: &Lead) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO leads
            (lead_uid, account_uid, full_name, phone)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(lead.id.inner_ref())
        .bind(lead.account_id.inner_ref())
        .bind(&lead.full_name)
        .bind(lead.phone.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, lead_id: &ID) -> Option<Lead> {
        match sqlx::query_as::<_, LeadRaw>(
            r#"
            SELECT * FROM leads AS l
            WHERE l.lead_uid = $1
            "#,
        )
        .bind(lead_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(Some(lead)) => Some(lead.into()),
            _ => None,
        }
    }

    async fn find_many(&self, lead_ids: &[ID]) -> Vec<Lead> {
        let lead_ids = lead_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let leads: Vec<LeadRaw> = sqlx::query_as::<_, LeadRaw>(
            r#"
            SELECT * FROM leads AS l
            WHERE l.lead_uid = ANY($1)
            "#,
        )
        .bind(&lead_ids)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        leads.into_iter().map(|l| l.into()).collect()
    }
}
