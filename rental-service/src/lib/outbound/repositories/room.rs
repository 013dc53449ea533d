use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::page::PageRequest;
use crate::identity::models::IdentityId;
use crate::room::errors::RoomError;
use crate::room::models::Room;
use crate::room::models::RoomId;
use crate::room::ports::RoomRepository;

const ROOM_COLUMNS: &str = "id, title, description, room_type, status, area, price_per_month, \
                            deposit, max_occupants, floor, owner_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    title: String,
    description: String,
    room_type: String,
    status: String,
    area: f64,
    price_per_month: i64,
    deposit: i64,
    max_occupants: i32,
    floor: i32,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RoomRow> for Room {
    type Error = RoomError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Room {
            id: RoomId(row.id),
            title: row.title,
            description: row.description,
            room_type: row.room_type.parse()?,
            status: row.status.parse()?,
            area: row.area,
            price_per_month: row.price_per_month,
            deposit: row.deposit,
            max_occupants: row.max_occupants,
            floor: row.floor,
            owner_id: IdentityId(row.owner_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> RoomError {
    RoomError::DatabaseError(e.to_string())
}

pub struct PostgresRoomRepository {
    pool: PgPool,
}

impl PostgresRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepository {
    async fn insert(&self, room: Room) -> Result<Room, RoomError> {
        sqlx::query(
            r#"
            INSERT INTO rooms (id, title, description, room_type, status, area, price_per_month,
                               deposit, max_occupants, floor, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(room.id.0)
        .bind(&room.title)
        .bind(&room.description)
        .bind(room.room_type.as_str())
        .bind(room.status.as_str())
        .bind(room.area)
        .bind(room.price_per_month)
        .bind(room.deposit)
        .bind(room.max_occupants)
        .bind(room.floor)
        .bind(room.owner_id.0)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(room)
    }

    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, RoomError> {
        let row: Option<RoomRow> =
            sqlx::query_as(&format!("SELECT {} FROM rooms WHERE id = $1", ROOM_COLUMNS))
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

        row.map(Room::try_from).transpose()
    }

    async fn list(&self, page: &PageRequest) -> Result<(Vec<Room>, u64), RoomError> {
        let rows: Vec<RoomRow> = sqlx::query_as(&format!(
            "SELECT {} FROM rooms ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            ROOM_COLUMNS
        ))
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        let rooms = rows
            .into_iter()
            .map(Room::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((rooms, total as u64))
    }

    async fn update(&self, room: Room) -> Result<Room, RoomError> {
        let result = sqlx::query(
            r#"
            UPDATE rooms
            SET title = $2, description = $3, room_type = $4, status = $5, area = $6,
                price_per_month = $7, deposit = $8, max_occupants = $9, floor = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(room.id.0)
        .bind(&room.title)
        .bind(&room.description)
        .bind(room.room_type.as_str())
        .bind(room.status.as_str())
        .bind(room.area)
        .bind(room.price_per_month)
        .bind(room.deposit)
        .bind(room.max_occupants)
        .bind(room.floor)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RoomError::NotFound(room.id.to_string()));
        }

        Ok(room)
    }

    async fn delete(&self, id: &RoomId) -> Result<(), RoomError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RoomError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
