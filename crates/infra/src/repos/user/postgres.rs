use super::IUserRepo;
use herald_domain::{User, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    account_uid: Uuid,
    email: Option<String>,
    full_name: Option<String>,
    name: Option<String>,
    timezone: Option<String>,
    active: bool,
}

impl Into<User> for UserRaw {
    fn into(self) -> User {
        User {
            id: self.user_uid.into(),
            account_id: self.account_uid.into(),
            email: self.email,
            full_name: self.full_name,
            name: self.name,
            timezone: self.timezone,
            active: self.active,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users
            (user_uid, account_uid, email, full_name, name, timezone, active)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(user.account_id.inner_ref())
        .bind(user.email.as_deref())
        .bind(user.full_name.as_deref())
        .bind(user.name.as_deref())
        .bind(user.timezone.as_deref())
        .bind(user.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = $2,
            full_name = $3,
            name = $4,
            timezone = $5,
            active = $6
            WHERE user_uid = $1
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(user.email.as_deref())
        .bind(user.full_name.as_deref())
        .bind(user.name.as_deref())
        .bind(user.timezone.as_deref())
        .bind(user.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        match sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(Some(user)) => Some(user.into()),
            _ => None,
        }
    }

    async fn find_digest_candidates(&self) -> anyhow::Result<Vec<User>> {
        let users: Vec<UserRaw> = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.active = TRUE AND
            u.email IS NOT NULL AND
            u.email <> ''
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(|u| u.into()).collect())
    }
}
