// 統合テストのエントリポイント

#[allow(dead_code)]
#[path = "../fixtures/mod.rs"]
mod fixtures;

mod test_end_to_end;
mod test_shutdown;
