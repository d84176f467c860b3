//! Migration runner behavior against the in-memory engine.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn rerunning_migrations_is_a_no_op() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    hotelhub_db::run_migrations(&db).await.unwrap();
    hotelhub_db::run_migrations(&db).await.unwrap();

    // One tracking row per version, not one per run.
    let mut result = db
        .query("SELECT VALUE version FROM _migration")
        .await
        .unwrap();
    let versions: Vec<u32> = result.take(0).unwrap();
    assert_eq!(versions, vec![1]);
}
