use ballot_store::KeyValueStore;
use ballot_store_lmdb::environment::DEFAULT_MAP_SIZE;
use ballot_store_lmdb::LmdbEnvironment;

fn temp_env() -> (tempfile::TempDir, LmdbEnvironment) {
    let dir = tempfile::tempdir().expect("temp dir");
    let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).expect("open env");
    (dir, env)
}

#[test]
fn missing_key_reads_as_none() {
    let (_dir, env) = temp_env();
    let store = env.kv_store();
    assert_eq!(store.get("contract").unwrap(), None);
    assert!(!store.contains("contract").unwrap());
}

#[test]
fn set_overwrites_previous_value() {
    let (_dir, env) = temp_env();
    let store = env.kv_store();
    store.set("contract", "0x1111111111111111111111111111111111111111").unwrap();
    store.set("contract", "0x2222222222222222222222222222222222222222").unwrap();
    assert_eq!(
        store.get("contract").unwrap().as_deref(),
        Some("0x2222222222222222222222222222222222222222")
    );
}

#[test]
fn delete_is_idempotent() {
    let (_dir, env) = temp_env();
    let store = env.kv_store();
    store.set("contract", "x").unwrap();
    store.delete("contract").unwrap();
    store.delete("contract").unwrap();
    assert_eq!(store.get("contract").unwrap(), None);
}

#[test]
fn values_survive_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    {
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
        env.kv_store()
            .set("contract", "0x1111111111111111111111111111111111111111")
            .unwrap();
    }
    let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).unwrap();
    assert_eq!(
        env.kv_store().get("contract").unwrap().as_deref(),
        Some("0x1111111111111111111111111111111111111111")
    );
}

#[test]
fn open_creates_missing_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let nested = dir.path().join("a").join("b");
    let env = LmdbEnvironment::open(&nested, DEFAULT_MAP_SIZE).unwrap();
    assert_eq!(env.path(), nested.as_path());
    assert!(nested.exists());
}
