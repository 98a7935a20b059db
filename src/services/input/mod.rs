// 入力源
// 対話的な標準入力と、テスト用のスクリプト入力

pub mod implementations;

pub use implementations::{StdinLineSource, VecLineSource};
