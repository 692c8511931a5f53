use sqlx::PgPool;

/// All `id` columns must be bigint.
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

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table must carry created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// TEXT is used for strings, never VARCHAR.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(rows.is_empty(), "VARCHAR columns found: {rows:?}");
}

/// Calendar columns are DATE so range filters compare correctly.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_calendar_columns_are_dates(pool: PgPool) {
    let rows: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT table_name, column_name, data_type
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND (column_name LIKE '%\\_date' OR column_name LIKE 'period\\_%')",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(rows.len() >= 9);
    for (table, column, data_type) in &rows {
        assert_eq!(data_type, "date", "{table}.{column} should be date");
    }
}

/// Every table has the updated_at trigger attached.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_triggers_exist(pool: PgPool) {
    let missing: Vec<(String,)> = sqlx::query_as(
        "SELECT t.table_name
         FROM information_schema.tables t
         WHERE t.table_schema = 'public'
           AND t.table_type = 'BASE TABLE'
           AND t.table_name != '_sqlx_migrations'
           AND NOT EXISTS (
               SELECT 1 FROM information_schema.triggers tr
               WHERE tr.event_object_table = t.table_name
                 AND tr.trigger_name = 'set_updated_at'
           )",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(missing.is_empty(), "Tables without set_updated_at: {missing:?}");
}
