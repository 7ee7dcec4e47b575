//! tablero-core
//!
//! Core building blocks for the Tablero task board.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, state, errors）
//! - **store**: TaskStore ポートと実装（JsonFileStore, MemoryStore）
//! - **amortization**: ローン返済スケジュール計算（純粋関数、ストアとは独立）

pub mod amortization;
pub mod domain;
pub mod store;
