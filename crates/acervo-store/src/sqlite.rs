//! SQLite-backed [`Store`] implementation.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use crate::models::{
    Cliente, ClienteComDocumentos, Documento, NovoCliente, NovoDocumento, ResumoDocumento,
};
use crate::{Store, StoreResult};

/// Opens (creating if missing) the database at `path`.
///
/// WAL journal, foreign keys enforced, 5 s busy timeout.
pub async fn connect(path: &Path) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Opens a private in-memory database, for tests.
///
/// Capped at a single connection: each SQLite in-memory connection is its
/// own database.
pub async fn connect_in_memory() -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Creates the record tables when they do not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS "clientes" (
          "id"            INTEGER PRIMARY KEY,
          "nome"          TEXT NOT NULL COLLATE NOCASE,
          "email"         TEXT NOT NULL UNIQUE,
          "data_cadastro" TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        ) STRICT
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS "documentos" (
          "id"                 INTEGER PRIMARY KEY,
          "cliente_id"         INTEGER NOT NULL,
          "titulo"             TEXT NOT NULL,
          "conteudo"           TEXT,
          "data_processamento" TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
          "tipo"               TEXT NOT NULL,
          "url_origem"         TEXT,
          FOREIGN KEY("cliente_id") REFERENCES "clientes" ("id") ON DELETE CASCADE
        ) STRICT
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// SQLite implementation of the [`Store`] trait over a connection pool.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wraps an already-connected pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn cliente_from_row(row: &sqlx::sqlite::SqliteRow) -> Cliente {
    Cliente {
        id: row.get("id"),
        nome: row.get("nome"),
        email: row.get("email"),
        data_cadastro: row.get("data_cadastro"),
    }
}

fn documento_from_row(row: &sqlx::sqlite::SqliteRow) -> Documento {
    Documento {
        id: row.get("id"),
        cliente_id: row.get("cliente_id"),
        titulo: row.get("titulo"),
        conteudo: row.get("conteudo"),
        data_processamento: row.get("data_processamento"),
        tipo: row.get("tipo"),
        url_origem: row.get("url_origem"),
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn criar_cliente(&self, novo: &NovoCliente) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"INSERT OR IGNORE INTO "clientes" ("nome", "email", "data_cadastro") VALUES (?, ?, ?)"#,
        )
        .bind(&novo.nome)
        .bind(&novo.email)
        .bind(&novo.data_cadastro)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn listar_clientes(&self) -> StoreResult<Vec<Cliente>> {
        let rows = sqlx::query(r#"SELECT * FROM "clientes""#)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(cliente_from_row).collect())
    }

    async fn consultar_cliente(&self, nome: &str) -> StoreResult<Option<Cliente>> {
        let row = sqlx::query(r#"SELECT * FROM "clientes" WHERE "nome" = ?"#)
            .bind(nome)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(cliente_from_row))
    }

    async fn atualizar_cliente(&self, id: i64, nome: &str, email: &str) -> StoreResult<u64> {
        let result =
            sqlx::query(r#"UPDATE "clientes" SET "nome" = ?, "email" = ? WHERE "id" = ?"#)
                .bind(nome)
                .bind(email)
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    async fn deletar_cliente(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query(r#"DELETE FROM "clientes" WHERE "id" = ?"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn criar_documento(&self, novo: &NovoDocumento) -> StoreResult<i64> {
        let data_processamento = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let result = sqlx::query(
            r#"
            INSERT INTO "documentos"
              ("cliente_id", "titulo", "conteudo", "data_processamento", "tipo", "url_origem")
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(novo.cliente_id)
        .bind(&novo.titulo)
        .bind(&novo.conteudo)
        .bind(&data_processamento)
        .bind(&novo.tipo)
        .bind(&novo.url_origem)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn listar_clientes_com_documentos(&self) -> StoreResult<Vec<ClienteComDocumentos>> {
        let rows = sqlx::query(
            r#"
            SELECT
              c.id,
              c.nome,
              c.email,
              c.data_cadastro,
              COUNT(d.id) AS total_documentos
            FROM "clientes" c
            LEFT JOIN "documentos" d ON c.id = d.cliente_id
            GROUP BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| ClienteComDocumentos {
                id: row.get("id"),
                nome: row.get("nome"),
                email: row.get("email"),
                data_cadastro: row.get("data_cadastro"),
                total_documentos: row.get("total_documentos"),
            })
            .collect())
    }

    async fn listar_documentos_do_cliente(&self, cliente_id: i64) -> StoreResult<Vec<Documento>> {
        let rows = sqlx::query(r#"SELECT * FROM "documentos" WHERE "cliente_id" = ?"#)
            .bind(cliente_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(documento_from_row).collect())
    }

    async fn resumo_documentos_do_cliente(
        &self,
        cliente_id: i64,
    ) -> StoreResult<Vec<ResumoDocumento>> {
        let rows = sqlx::query(
            r#"
            SELECT "titulo", "data_processamento", "tipo"
            FROM "documentos"
            WHERE "cliente_id" = ?
            "#,
        )
        .bind(cliente_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| ResumoDocumento {
                titulo: row.get("titulo"),
                data_processamento: row.get("data_processamento"),
                tipo: row.get("tipo"),
            })
            .collect())
    }
}
