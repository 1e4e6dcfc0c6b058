use sqlx::PgPool;

/// Every `id` column is a bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows.len(), 3);
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "{table}.id should be bigint");
    }
}

/// Every table has `created_at` and `updated_at` as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    for table in ["categories", "products", "images"] {
        for col in ["created_at", "updated_at"] {
            let data_type: Option<String> = sqlx::query_scalar(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = $1
                   AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            assert_eq!(
                data_type.as_deref(),
                Some("timestamp with time zone"),
                "{table}.{col} should be timestamptz"
            );
        }
    }
}

/// Migrations leave a working pool behind.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check(pool: PgPool) {
    catalog_db::health_check(&pool).await.unwrap();
}
